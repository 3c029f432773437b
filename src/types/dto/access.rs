use poem_openapi::Object;

/// Identity and role flags of the caller
#[derive(Object, Debug)]
pub struct MeResponse {
    pub user_id: String,
    pub email: Option<String>,
    /// SUPER_USER or USER_GRANTED
    pub role: String,
    /// False when the role was defaulted because no role row could be read
    pub role_assigned: bool,
    pub is_super_user: bool,
    pub is_read_only: bool,
}

/// Notice shown instead of a page the caller may not see
#[derive(Object, Debug)]
pub struct AccessNotice {
    pub title: String,
    pub message: String,
    /// Label of the manual back action
    pub back_label: String,
}

/// Guard decision for one dashboard page
#[derive(Object, Debug)]
pub struct AccessResponse {
    pub page: String,
    /// granted, redirect_to_login, page_unavailable, access_denied
    pub decision: String,
    pub is_super_user: bool,
    pub is_read_only: bool,
    pub notice: Option<AccessNotice>,
}
