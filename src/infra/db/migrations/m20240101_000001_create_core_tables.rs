//! Migration: Create departments, users, employees and holiday_histories.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Departments::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::DepartmentId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_department")
                            .from(Users::Table, Users::DepartmentId)
                            .to(Departments::Table, Departments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string().not_null())
                    .col(ColumnDef::new(Employees::LastName).string().not_null())
                    .col(ColumnDef::new(Employees::MiddleName).string().null())
                    .col(ColumnDef::new(Employees::DepartmentId).integer().not_null())
                    .col(ColumnDef::new(Employees::RoleInCompany).string().not_null())
                    .col(ColumnDef::new(Employees::HiredAt).date().not_null())
                    .col(
                        ColumnDef::new(Employees::IsOnHoliday)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_department")
                            .from(Employees::Table, Employees::DepartmentId)
                            .to(Departments::Table, Departments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HolidayHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HolidayHistories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HolidayHistories::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HolidayHistories::Start).date().not_null())
                    .col(ColumnDef::new(HolidayHistories::End).date().not_null())
                    .col(
                        ColumnDef::new(HolidayHistories::CreatedByHr)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_holiday_histories_employee")
                            .from(HolidayHistories::Table, HolidayHistories::EmployeeId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_holiday_histories_created_by")
                            .from(HolidayHistories::Table, HolidayHistories::CreatedByHr)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_department_id")
                    .table(Employees::Table)
                    .col(Employees::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_holiday_histories_employee_id")
                    .table(HolidayHistories::Table)
                    .col(HolidayHistories::EmployeeId)
                    .to_owned(),
            )
            .await?;

        // Duplicate-identity backstop. The expression over middle_name can't
        // be built with the schema DSL, so raw SQL it is.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_employees_identity \
                 ON employees (first_name, last_name, COALESCE(middle_name, ''), department_id)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_employees_identity")
            .await?;

        manager
            .drop_table(Table::drop().table(HolidayHistories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Role,
    DepartmentId,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    MiddleName,
    DepartmentId,
    RoleInCompany,
    HiredAt,
    IsOnHoliday,
}

#[derive(Iden)]
enum HolidayHistories {
    Table,
    Id,
    EmployeeId,
    Start,
    End,
    CreatedByHr,
}
