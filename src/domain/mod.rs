//! Domain layer: records, identifiers, key encoding, and the event bus.
//!
//! This module contains the value types shared by the stores and the
//! repositories: user and event records, their identifiers, the encoded
//! email key used to address remote records, form validation rules, and
//! the broadcast bus used to announce store transitions.

pub mod email;
pub mod event;
pub mod event_bus;
pub mod ids;
pub mod user;
pub mod validation;

pub use email::{EncodedEmail, decode_email, encode_email};
pub use event::{Event, EventCategory, EventStatus, EventType, GeoPoint, TicketPrice};
pub use event_bus::EventBus;
pub use ids::{SessionId, UserId};
pub use user::{NewUser, Role, User, UserPatch};
pub use validation::{CredentialErrors, validate_credentials};
