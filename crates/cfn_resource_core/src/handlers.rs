//! Pure response builders, one per custom-resource handler.
//!
//! Each builder maps an event (plus whatever input the runtime fetched for it)
//! to the envelope that gets PUT to the callback URL. Delete requests never
//! reach these builders; see [`crate::contract::delete_response`].

pub mod event_context;
pub mod random_word;
pub mod skeleton;
