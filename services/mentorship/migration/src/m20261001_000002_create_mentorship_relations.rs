use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MentorshipRelations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorshipRelations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::ActionUserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentorshipRelations::MentorId).uuid().not_null())
                    .col(ColumnDef::new(MentorshipRelations::MenteeId).uuid().not_null())
                    .col(
                        ColumnDef::new(MentorshipRelations::State)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::CreationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentorshipRelations::AcceptDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(MentorshipRelations::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentorshipRelations::Table, MentorshipRelations::MentorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentorshipRelations::Table, MentorshipRelations::MenteeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(MentorshipRelations::Table)
                    .col(MentorshipRelations::MentorId)
                    .col(MentorshipRelations::State)
                    .name("idx_mentorship_relations_mentor_id_state")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(MentorshipRelations::Table)
                    .col(MentorshipRelations::MenteeId)
                    .col(MentorshipRelations::State)
                    .name("idx_mentorship_relations_mentee_id_state")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MentorshipRelations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MentorshipRelations {
    Table,
    Id,
    ActionUserId,
    MentorId,
    MenteeId,
    State,
    CreationDate,
    AcceptDate,
    EndDate,
    Notes,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
