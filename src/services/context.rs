use uuid::Uuid;

#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
}
