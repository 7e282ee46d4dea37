/// Stage shown before the first successful poll of a job.
pub const INITIAL_STAGE: &str = "Initializing";

/// Status fields as reported by the remote service, already type-checked at the
/// gateway boundary. Any field may be missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawStatus {
    pub stage: Option<String>,
    pub percent: Option<f64>,
    pub eta_human: Option<String>,
    pub eta_seconds: Option<f64>,
    pub download_link: Option<String>,
}

/// Normalized progress snapshot. `None` fields mean "unknown".
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressModel {
    pub stage: String,
    pub percent: Option<f64>,
    pub eta_human: Option<String>,
    pub eta_seconds: Option<f64>,
}

impl ProgressModel {
    /// Snapshot for a job that has not been polled yet.
    pub fn initial() -> Self {
        Self {
            stage: INITIAL_STAGE.to_string(),
            percent: None,
            eta_human: None,
            eta_seconds: None,
        }
    }

    /// Derives a snapshot from a raw status. Pure: depends on `raw` only.
    pub fn from_raw(raw: &RawStatus) -> Self {
        Self {
            stage: raw.stage.clone().unwrap_or_default(),
            percent: raw
                .percent
                .filter(|p| p.is_finite())
                .map(|p| p.clamp(0.0, 100.0)),
            eta_human: raw.eta_human.clone().filter(|eta| !eta.trim().is_empty()),
            eta_seconds: raw.eta_seconds.filter(|s| s.is_finite() && *s >= 0.0),
        }
    }

    pub fn percent_label(&self) -> String {
        match self.percent {
            Some(p) => format!("{p:.0}%"),
            None => "--".to_string(),
        }
    }

    pub fn eta_label(&self) -> String {
        format!("ETA: {}", self.eta_human.as_deref().unwrap_or("--"))
    }

    pub fn stage_label(&self) -> String {
        if self.stage.is_empty() || self.stage == INITIAL_STAGE {
            format!("{INITIAL_STAGE}...")
        } else {
            self.stage.clone()
        }
    }

    /// Indeterminate progress renders as a busy indicator rather than a bar.
    pub fn is_indeterminate(&self) -> bool {
        self.percent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_percent(percent: Option<f64>) -> RawStatus {
        RawStatus {
            stage: Some("Processing".into()),
            percent,
            ..RawStatus::default()
        }
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(ProgressModel::from_raw(&raw_with_percent(Some(150.0))).percent, Some(100.0));
        assert_eq!(ProgressModel::from_raw(&raw_with_percent(Some(-5.0))).percent, Some(0.0));
        assert_eq!(ProgressModel::from_raw(&raw_with_percent(Some(40.0))).percent, Some(40.0));
        assert_eq!(ProgressModel::from_raw(&raw_with_percent(None)).percent, None);
        assert_eq!(ProgressModel::from_raw(&raw_with_percent(Some(f64::NAN))).percent, None);
    }

    #[test]
    fn derivation_is_idempotent() {
        let raw = RawStatus {
            stage: Some("Bundling".into()),
            percent: Some(72.5),
            eta_human: Some("2 min".into()),
            eta_seconds: Some(120.0),
            download_link: None,
        };
        assert_eq!(ProgressModel::from_raw(&raw), ProgressModel::from_raw(&raw));
    }

    #[test]
    fn negative_eta_seconds_is_unknown() {
        let raw = RawStatus {
            eta_seconds: Some(-1.0),
            eta_human: Some("".into()),
            ..RawStatus::default()
        };
        let model = ProgressModel::from_raw(&raw);
        assert_eq!(model.eta_seconds, None);
        assert_eq!(model.eta_human, None);
        assert_eq!(model.stage, "");
    }

    #[test]
    fn labels_fall_back_to_placeholders() {
        let model = ProgressModel::initial();
        assert_eq!(model.stage_label(), "Initializing...");
        assert_eq!(model.percent_label(), "--");
        assert_eq!(model.eta_label(), "ETA: --");
        assert!(model.is_indeterminate());

        let model = ProgressModel::from_raw(&RawStatus {
            stage: Some("Sampling".into()),
            percent: Some(39.6),
            eta_human: Some("3 min".into()),
            ..RawStatus::default()
        });
        assert_eq!(model.stage_label(), "Sampling");
        assert_eq!(model.percent_label(), "40%");
        assert_eq!(model.eta_label(), "ETA: 3 min");
    }
}
