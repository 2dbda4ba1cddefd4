//! Database models and their client-safe projections.
//!
//! Each entity has a server-only row struct (derives [`sqlx::FromRow`], gated
//! behind the `server` feature) and a `*Info` struct that is
//! `Serialize + Deserialize + PartialEq` so it can cross the server/client
//! boundary through Dioxus server functions. Row structs convert with
//! `to_info()`; ids become `String`s so they work in WASM.

pub mod chat;
pub mod customer;
pub mod hr;
pub mod invoice;
pub mod it;
pub mod leave;
pub mod manuscript;
pub mod performance;
pub mod recruitment;
pub mod user;

pub use chat::{ChatContactInfo, ChatMessageInfo, ChatRoomInfo};
pub use customer::{BulkAssignRequest, CustomerFilters, CustomerInfo, CustomerType};
pub use hr::{DepartmentInfo, DesignationInfo, EmployeeInfo};
pub use invoice::{compute_totals, InvoiceInfo, InvoiceTotals, LineItem};
pub use it::{ItAssetInfo, ItDashboardInfo, ItTicketInfo, TicketPriority, TicketStatus};
pub use leave::{available_days, LeaveBalanceInfo};
pub use manuscript::{AuthorEntry, DraftInfo, JournalInfo, ManuscriptInfo};
pub use performance::{progress_percent, KpiInfo, PerformanceReviewInfo};
pub use recruitment::{ExamQuestion, JobExamInfo, JobPostingInfo};
pub use user::{Role, UserInfo};

#[cfg(feature = "server")]
pub use chat::{ChatMessage, ChatRoom};
#[cfg(feature = "server")]
pub use customer::CustomerProfile;
#[cfg(feature = "server")]
pub use hr::{Department, Designation, Employee};
#[cfg(feature = "server")]
pub use invoice::Invoice;
#[cfg(feature = "server")]
pub use it::{ItAsset, ItTicket};
#[cfg(feature = "server")]
pub use leave::LeaveBalance;
#[cfg(feature = "server")]
pub use manuscript::{Journal, Manuscript, ManuscriptDraft};
#[cfg(feature = "server")]
pub use performance::{Kpi, PerformanceReview};
#[cfg(feature = "server")]
pub use recruitment::{JobExam, JobPosting};
#[cfg(feature = "server")]
pub use user::User;

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            ((total + limit as u64 - 1) / limit as u64) as u32
        };
        Self {
            data,
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Paginated::<u8>::new(vec![], 1, 10, 0).total_pages, 0);
        assert_eq!(Paginated::<u8>::new(vec![], 1, 10, 10).total_pages, 1);
        assert_eq!(Paginated::<u8>::new(vec![], 1, 10, 11).total_pages, 2);
        assert_eq!(Paginated::<u8>::new(vec![], 1, 10, 100).total_pages, 10);
    }

    #[test]
    fn test_zero_limit_is_zero_pages() {
        assert_eq!(Paginated::<u8>::new(vec![], 1, 0, 50).total_pages, 0);
    }
}
