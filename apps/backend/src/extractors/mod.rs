pub mod current_user;
pub mod gated;
pub mod id_query;
pub mod validated_json;

pub use current_user::{AdminUser, CurrentUser};
pub use gated::Gated;
pub use id_query::IdQuery;
pub use validated_json::ValidatedJson;
