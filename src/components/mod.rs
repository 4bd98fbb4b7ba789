//! UI Components
//!
//! Views, the shell and reusable pieces.

mod auth_form;
mod chat_panel;
mod dashboard;
mod delete_confirm_button;
mod edit_item_modal;
mod error_banner;
mod history_timeline;
mod layout;
mod scanner;
mod stock_list;

pub use auth_form::AuthForm;
pub use chat_panel::ChatPanel;
pub use dashboard::Dashboard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use edit_item_modal::EditItemModal;
pub use error_banner::ErrorBanner;
pub use history_timeline::HistoryTimeline;
pub use layout::Layout;
pub use scanner::Scanner;
pub use stock_list::StockList;
