mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::{
    Assets, Chat, Customers, DashboardHome, DashboardLayout, Designations, Exams, Invoices,
    ItDashboard, Leaves, Performance, Submit, Tickets, Users,
};

/// Load the locally stored config, falling back to defaults.
pub(crate) async fn load_config() -> store::OpsDeckConfig {
    use store::KvStore;

    let kv = ui::make_store();
    match kv.get(store::OpsDeckConfig::filename()).await {
        Some(raw) => store::OpsDeckConfig::from_toml(&raw).unwrap_or_default(),
        None => store::OpsDeckConfig::default(),
    }
}
