use crate::tenancy::domain::model::value_objects::record_id::RecordId;

#[derive(Clone, Debug)]
pub struct ApproveUserCommand {
    user_id: RecordId,
}

impl ApproveUserCommand {
    pub fn new(user_id: impl Into<RecordId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &RecordId {
        &self.user_id
    }
}
