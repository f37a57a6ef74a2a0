pub mod api202001_alpha;
mod export_jobs_trigger_accepted_response_headers;

pub use export_jobs_trigger_accepted_response_headers::ExportJobsTriggerAcceptedResponseHeaders;
