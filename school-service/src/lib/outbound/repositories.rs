pub mod edit_request;
pub mod school;

pub use edit_request::PostgresEditRequestRepository;
pub use school::PostgresSchoolRepository;
