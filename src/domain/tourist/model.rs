/// Tourist-specific details captured at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouristProfile {
    pub user_id: String,
    pub nationality: Option<String>,
    pub phone: Option<String>,
}
