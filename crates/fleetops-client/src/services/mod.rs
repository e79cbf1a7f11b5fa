//! One service per backend resource.
//!
//! Services are thin, typed endpoint maps over [`ApiClient`](crate::http::ApiClient);
//! every path string matches the backend routes exactly.

mod branding;
mod certificates;
mod cleaning;
mod dashboard;
mod job_cards;
mod trains;

pub use branding::BrandingService;
pub use certificates::CertificateService;
pub use cleaning::CleaningService;
pub use dashboard::DashboardService;
pub use job_cards::JobCardService;
pub use trains::TrainService;
