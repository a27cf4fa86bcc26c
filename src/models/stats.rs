use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicStats {
    pub total_projects: i64,
    pub featured_projects: i64,
    pub completed_orders: i64,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_projects: i64,
    pub total_orders: i64,
    pub pending_orders: i64,
    pub in_progress_orders: i64,
    pub completed_orders: i64,
    pub cancelled_orders: i64,
}
