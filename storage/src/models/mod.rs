mod account;
mod persisted_message;
mod session;

pub use account::{
    MembershipRecord, OrganizationRecord, ProductRecord, SubscribedProduct, SubscriptionRecord,
    UserRecord,
};
pub use persisted_message::PersistedMessage;
pub use session::SessionRecord;
