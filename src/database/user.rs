/// Fields supplied when adding or updating a user.
/// `None` leaves the stored value untouched on update.
#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub logged_in_user_name: Option<String>,
    pub logged_in_user_email: String,
    pub facebook_handle: Option<String>,
    pub twitter_handle: Option<String>,
}

impl NewUser {
    pub fn has_handles(&self) -> bool {
        self.facebook_handle.is_some() || self.twitter_handle.is_some()
    }
}

#[cfg(test)]
pub use record::UserRecord;
