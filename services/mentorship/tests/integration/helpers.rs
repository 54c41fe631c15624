use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use mentorship_domain::pagination::PageRequest;
use mentorship_domain::relation::RelationState;
use mentorship_service::domain::repository::{
    AcceptOutcome, RelationRepository, UserRepository,
};
use mentorship_service::domain::types::{MentorshipRelation, RelationFilter, User, UserPatch};
use mentorship_service::error::MentorshipServiceError;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Vec<User>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MentorshipServiceError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, _user: &User) -> Result<(), MentorshipServiceError> {
        Ok(())
    }

    async fn update(&self, id: Uuid, _patch: &UserPatch) -> Result<bool, MentorshipServiceError> {
        Ok(self.users.iter().any(|u| u.id == id))
    }

    async fn list_except(
        &self,
        exclude: Uuid,
        _page: PageRequest,
    ) -> Result<Vec<User>, MentorshipServiceError> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.id != exclude)
            .cloned()
            .collect())
    }
}

// ── MockRelationRepo ─────────────────────────────────────────────────────────

pub struct MockRelationRepo {
    pub relations: Arc<Mutex<Vec<MentorshipRelation>>>,
    /// State another request moves every relation into right before a mutating
    /// call, emulating a concurrent writer that wins the race.
    pub concurrent_state: Option<RelationState>,
}

impl MockRelationRepo {
    pub fn new(relations: Vec<MentorshipRelation>) -> Self {
        Self {
            relations: Arc::new(Mutex::new(relations)),
            concurrent_state: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn with_concurrent_state(mut self, state: RelationState) -> Self {
        self.concurrent_state = Some(state);
        self
    }

    /// Returns a shared handle to the stored relations for post-execution inspection.
    pub fn handle(&self) -> Arc<Mutex<Vec<MentorshipRelation>>> {
        Arc::clone(&self.relations)
    }

    fn race(&self, relations: &mut [MentorshipRelation]) {
        if let Some(state) = self.concurrent_state {
            for r in relations.iter_mut() {
                r.state = state;
            }
        }
    }
}

impl RelationRepository for MockRelationRepo {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<MentorshipRelation>, MentorshipServiceError> {
        Ok(self
            .relations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn create(&self, relation: &MentorshipRelation) -> Result<(), MentorshipServiceError> {
        self.relations.lock().unwrap().push(relation.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: RelationFilter,
    ) -> Result<Vec<MentorshipRelation>, MentorshipServiceError> {
        let mut found: Vec<_> = self
            .relations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.involves(user_id) && filter.matches(r))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
        Ok(found)
    }

    async fn delete_pending_by_creator(
        &self,
        id: Uuid,
        action_user_id: Uuid,
    ) -> Result<bool, MentorshipServiceError> {
        let mut relations = self.relations.lock().unwrap();
        self.race(&mut relations);
        let before = relations.len();
        relations.retain(|r| {
            !(r.id == id && r.action_user_id == action_user_id && r.state == RelationState::Pending)
        });
        Ok(relations.len() < before)
    }

    async fn transition(
        &self,
        id: Uuid,
        from: RelationState,
        to: RelationState,
    ) -> Result<bool, MentorshipServiceError> {
        let mut relations = self.relations.lock().unwrap();
        self.race(&mut relations);
        match relations.iter_mut().find(|r| r.id == id && r.state == from) {
            Some(r) => {
                r.state = to;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn accept_pending(
        &self,
        id: Uuid,
        requester: Uuid,
        sender: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AcceptOutcome, MentorshipServiceError> {
        let mut relations = self.relations.lock().unwrap();
        self.race(&mut relations);
        let busy = |user_id: Uuid| relations.iter().any(|r| r.involves(user_id) && r.is_current(now));
        if busy(requester) {
            return Ok(AcceptOutcome::RequesterBusy);
        }
        if busy(sender) {
            return Ok(AcceptOutcome::SenderBusy);
        }
        match relations
            .iter_mut()
            .find(|r| r.id == id && r.state == RelationState::Pending)
        {
            Some(r) => {
                r.state = RelationState::Accepted;
                r.accept_date = Some(now);
                Ok(AcceptOutcome::Accepted)
            }
            None => Ok(AcceptOutcome::NotPending),
        }
    }

    async fn complete_overdue(&self, now: DateTime<Utc>) -> Result<u64, MentorshipServiceError> {
        let mut completed = 0;
        for r in self.relations.lock().unwrap().iter_mut() {
            if r.state == RelationState::Accepted && r.end_date < now {
                r.state = RelationState::Completed;
                completed += 1;
            }
        }
        Ok(completed)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const MENTOR_ID: Uuid = Uuid::from_u128(0x0000_0001);
pub const MENTEE_ID: Uuid = Uuid::from_u128(0x0000_0002);
pub const OUTSIDER_ID: Uuid = Uuid::from_u128(0x0000_0099);

pub fn test_user(id: Uuid, username: &str) -> User {
    User {
        id,
        name: username.to_owned(),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        need_mentoring: true,
        available_to_mentor: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn mentor() -> User {
    test_user(MENTOR_ID, "mentor")
}

pub fn mentee() -> User {
    test_user(MENTEE_ID, "mentee")
}

/// A relation sent by the mentor to the mentee, ending five weeks from now.
pub fn test_relation(state: RelationState) -> MentorshipRelation {
    let now = Utc::now();
    MentorshipRelation {
        id: Uuid::now_v7(),
        action_user_id: MENTOR_ID,
        mentor_id: MENTOR_ID,
        mentee_id: MENTEE_ID,
        state,
        creation_date: now,
        accept_date: None,
        end_date: now + Duration::weeks(5),
        notes: "description of a good mentorship relation".to_owned(),
    }
}

/// A relation between two other users, so that `user_id` shows up as busy.
pub fn relation_involving(user_id: Uuid, state: RelationState) -> MentorshipRelation {
    MentorshipRelation {
        id: Uuid::now_v7(),
        action_user_id: user_id,
        mentor_id: user_id,
        mentee_id: Uuid::now_v7(),
        ..test_relation(state)
    }
}
