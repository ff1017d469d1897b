use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_profiles_table::Migration),
            Box::new(m20240601_000002_create_food_centers_table::Migration),
            Box::new(m20240601_000003_create_availability_updates_table::Migration),
            Box::new(m20240601_000004_create_reviews_table::Migration),
            Box::new(m20240601_000005_create_user_reports_table::Migration),
        ]
    }
}

mod m20240601_000001_create_profiles_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_profiles_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Profiles::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Profiles::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Profiles::Email).string().not_null())
                        .col(ColumnDef::new(Profiles::FullName).string().null())
                        .col(ColumnDef::new(Profiles::AvatarUrl).string().null())
                        .col(
                            ColumnDef::new(Profiles::Role)
                                .string_len(16)
                                .not_null()
                                .default("user"),
                        )
                        .col(
                            ColumnDef::new(Profiles::PreferredLanguage)
                                .string_len(8)
                                .not_null()
                                .default("en"),
                        )
                        .col(
                            ColumnDef::new(Profiles::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Profiles::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Profiles::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Profiles {
        Table,
        Id,
        Email,
        FullName,
        AvatarUrl,
        Role,
        PreferredLanguage,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000002_create_food_centers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_food_centers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(FoodCenters::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FoodCenters::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FoodCenters::Name).string().not_null())
                        .col(ColumnDef::new(FoodCenters::Description).text().null())
                        .col(ColumnDef::new(FoodCenters::Type).string_len(32).not_null())
                        .col(ColumnDef::new(FoodCenters::Address).string().not_null())
                        .col(ColumnDef::new(FoodCenters::City).string().not_null())
                        .col(ColumnDef::new(FoodCenters::Country).string().not_null())
                        .col(ColumnDef::new(FoodCenters::PostalCode).string().null())
                        .col(ColumnDef::new(FoodCenters::Phone).string().null())
                        .col(ColumnDef::new(FoodCenters::Email).string().null())
                        .col(ColumnDef::new(FoodCenters::Website).string().null())
                        .col(ColumnDef::new(FoodCenters::ContactPerson).string().null())
                        .col(ColumnDef::new(FoodCenters::Latitude).double().not_null())
                        .col(ColumnDef::new(FoodCenters::Longitude).double().not_null())
                        .col(ColumnDef::new(FoodCenters::OperatingHours).json().null())
                        .col(ColumnDef::new(FoodCenters::DietaryRestrictions).json().null())
                        .col(ColumnDef::new(FoodCenters::LanguagesSpoken).json().null())
                        .col(ColumnDef::new(FoodCenters::Capacity).integer().null())
                        .col(
                            ColumnDef::new(FoodCenters::CurrentAvailability)
                                .string_len(32)
                                .not_null()
                                .default("unknown"),
                        )
                        .col(
                            ColumnDef::new(FoodCenters::Verified)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(FoodCenters::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(FoodCenters::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FoodCenters::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_food_centers_lat_lng")
                        .table(FoodCenters::Table)
                        .col(FoodCenters::Latitude)
                        .col(FoodCenters::Longitude)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_food_centers_city")
                        .table(FoodCenters::Table)
                        .col(FoodCenters::City)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_food_centers_created_at")
                        .table(FoodCenters::Table)
                        .col(FoodCenters::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FoodCenters::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum FoodCenters {
        Table,
        Id,
        Name,
        Description,
        Type,
        Address,
        City,
        Country,
        PostalCode,
        Phone,
        Email,
        Website,
        ContactPerson,
        Latitude,
        Longitude,
        OperatingHours,
        DietaryRestrictions,
        LanguagesSpoken,
        Capacity,
        CurrentAvailability,
        Verified,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000003_create_availability_updates_table {

    use super::m20240601_000002_create_food_centers_table::FoodCenters;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_availability_updates_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AvailabilityUpdates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AvailabilityUpdates::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AvailabilityUpdates::FoodCenterId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AvailabilityUpdates::Status)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AvailabilityUpdates::Notes)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(AvailabilityUpdates::ReportedBy).uuid().null())
                        .col(
                            ColumnDef::new(AvailabilityUpdates::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_availability_updates_food_center")
                                .from(AvailabilityUpdates::Table, AvailabilityUpdates::FoodCenterId)
                                .to(FoodCenters::Table, FoodCenters::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_availability_updates_center_created")
                        .table(AvailabilityUpdates::Table)
                        .col(AvailabilityUpdates::FoodCenterId)
                        .col(AvailabilityUpdates::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AvailabilityUpdates::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum AvailabilityUpdates {
        Table,
        Id,
        FoodCenterId,
        Status,
        Notes,
        ReportedBy,
        CreatedAt,
    }
}

mod m20240601_000004_create_reviews_table {

    use super::m20240601_000002_create_food_centers_table::FoodCenters;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000004_create_reviews_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Reviews::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Reviews::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Reviews::FoodCenterId).uuid().not_null())
                        // No foreign key: the author may not have created a profile yet.
                        .col(ColumnDef::new(Reviews::UserId).uuid().not_null())
                        .col(ColumnDef::new(Reviews::Rating).integer().not_null())
                        .col(ColumnDef::new(Reviews::Comment).text().null())
                        .col(
                            ColumnDef::new(Reviews::HelpfulCount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Reviews::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Reviews::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reviews_food_center")
                                .from(Reviews::Table, Reviews::FoodCenterId)
                                .to(FoodCenters::Table, FoodCenters::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reviews_food_center_id")
                        .table(Reviews::Table)
                        .col(Reviews::FoodCenterId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Reviews::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Reviews {
        Table,
        Id,
        FoodCenterId,
        UserId,
        Rating,
        Comment,
        HelpfulCount,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000005_create_user_reports_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000005_create_user_reports_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UserReports::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserReports::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserReports::FoodCenterId).uuid().null())
                        .col(ColumnDef::new(UserReports::ReporterId).uuid().null())
                        .col(ColumnDef::new(UserReports::Type).string().not_null())
                        .col(ColumnDef::new(UserReports::Content).json().not_null())
                        .col(
                            ColumnDef::new(UserReports::Status)
                                .string_len(16)
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(UserReports::ModeratedBy).uuid().null())
                        .col(
                            ColumnDef::new(UserReports::ModeratedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(UserReports::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_user_reports_status")
                        .table(UserReports::Table)
                        .col(UserReports::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserReports::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum UserReports {
        Table,
        Id,
        FoodCenterId,
        ReporterId,
        Type,
        Content,
        Status,
        ModeratedBy,
        ModeratedAt,
        CreatedAt,
    }
}

