use sea_orm::entity::prelude::*;

/// Mentorship relation between a mentor and a mentee.
///
/// `state` holds the `RelationState` integer code.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mentorship_relations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub action_user_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub state: i16,
    pub creation_date: chrono::DateTime<chrono::Utc>,
    pub accept_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::MentorId",
        to = "super::users::Column::Id"
    )]
    Mentor,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::MenteeId",
        to = "super::users::Column::Id"
    )]
    Mentee,
}

impl ActiveModelBehavior for ActiveModel {}
