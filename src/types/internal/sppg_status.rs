use std::fmt;

/// Workflow status of an SPPG record
///
/// Any state may be changed to any other state by an operator; the backend
/// is the only place a status is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SppgStatus {
    PendingUpdate,
    Approved,
    ApprovedKuota,
    OnHold,
    Reject,
}

impl SppgStatus {
    pub const ALL: [SppgStatus; 5] = [
        SppgStatus::PendingUpdate,
        SppgStatus::Approved,
        SppgStatus::ApprovedKuota,
        SppgStatus::OnHold,
        SppgStatus::Reject,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SppgStatus::PendingUpdate => "PENDING UPDATE",
            SppgStatus::Approved => "APPROVED",
            SppgStatus::ApprovedKuota => "APPROVED KUOTA",
            SppgStatus::OnHold => "ON HOLD",
            SppgStatus::Reject => "REJECT",
        }
    }

    /// Parse an operator-supplied status; surrounding whitespace is ignored
    pub fn parse(value: &str) -> Option<SppgStatus> {
        let value = value.trim();
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    /// Interpret the stored column value. Unset means `PENDING UPDATE`.
    ///
    /// Unrecognised stored values also read as `PENDING UPDATE` so a bad row
    /// never hides a record from the status filter.
    pub fn from_stored(value: Option<&str>) -> SppgStatus {
        match value.map(str::trim) {
            None | Some("") => SppgStatus::PendingUpdate,
            Some(raw) => SppgStatus::parse(raw).unwrap_or_else(|| {
                tracing::warn!("Unrecognised stored status '{}', reading as PENDING UPDATE", raw);
                SppgStatus::PendingUpdate
            }),
        }
    }

    /// Statuses an operator may pick from the current one
    pub fn transitions_from(&self) -> Vec<SppgStatus> {
        Self::ALL.to_vec()
    }
}

impl fmt::Display for SppgStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
