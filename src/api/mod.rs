//! Backend HTTP calls.

mod error;
mod status;
mod upload;

pub use error::ApiError;
pub use status::{BackendStatus, fetch_status};
pub use upload::{FILES_FIELD, Part, UploadRequest, interpret_response, post_files};

/// Backend routes used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
	/// `POST /summarize/`
	Summarize,
	/// `POST /knowledge-graph/`
	KnowledgeGraph,
	/// `POST /qa/`
	Qa,
	/// `GET /status`
	Status,
}

impl Endpoint {
	/// Path relative to the configured API base.
	pub fn path(self) -> &'static str {
		match self {
			Endpoint::Summarize => "/summarize/",
			Endpoint::KnowledgeGraph => "/knowledge-graph/",
			Endpoint::Qa => "/qa/",
			Endpoint::Status => "/status",
		}
	}
}
