mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod submit_wizard;
pub use submit_wizard::SubmitWizardView;

mod chat;
pub use chat::ChatView;

mod customers;
pub use customers::CustomersView;

mod designations;
pub use designations::DesignationsView;

mod assets;
pub use assets::AssetsView;

mod tickets;
pub use tickets::TicketsView;

mod it_dashboard;
pub use it_dashboard::ItDashboardView;

mod users;
pub use users::UsersView;

mod leave_balances;
pub use leave_balances::LeaveBalancesView;

mod invoices;
pub use invoices::InvoicesView;

mod performance;
pub use performance::PerformanceView;

mod exam_manager;
pub use exam_manager::ExamManagerView;
