mod publish;
mod validate;

pub use publish::{publish, PublishArgs};
pub use validate::{validate, ValidateArgs};
