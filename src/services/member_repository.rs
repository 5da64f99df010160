use color_eyre::eyre::eyre;

use crate::domain::{
    DbHandlerType, EmploymentStatus, Member, MemberId, MemberRepositoryError,
    NewMember, Row, RowDecodeError, Statement, Status,
};

pub const INSERT_MEMBER_SQL: &str = r#"
    INSERT INTO members (no, profile_img, full_name, kana_name, motto, biography, start_date, end_date, employment_status_id, status_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    RETURNING id, created_at, updated_at
"#;

pub const FIND_MEMBER_BY_ID_SQL: &str = r#"
    SELECT members.id, members.no, members.profile_img, members.full_name, members.kana_name,
           members.motto, members.biography, members.start_date, members.end_date,
           members.employment_status_id, members.status_id, members.created_at, members.updated_at,
           employment_statuses.name AS employment_status_name,
           employment_statuses.created_at AS employment_status_created_at,
           employment_statuses.updated_at AS employment_status_updated_at,
           statuses.name AS status_name,
           statuses.created_at AS status_created_at,
           statuses.updated_at AS status_updated_at
    FROM members
    LEFT JOIN employment_statuses ON employment_statuses.id = members.employment_status_id
    LEFT JOIN statuses ON statuses.id = members.status_id
    WHERE members.id = $1
    LIMIT 1
"#;

/// Creates and fetches members through an injected `DbHandler`.
#[derive(Clone)]
pub struct MemberRepository {
    db_handler: DbHandlerType,
}

impl MemberRepository {
    pub fn new(db_handler: DbHandlerType) -> Self {
        Self { db_handler }
    }

    /// Persists `member` as a new row and returns it with the identifier and
    /// timestamps assigned by the store.
    #[tracing::instrument(name = "Inserting member", skip_all)]
    pub async fn new_member(
        &self,
        member: NewMember,
    ) -> Result<Member, MemberRepositoryError> {
        let statement = Statement::new(INSERT_MEMBER_SQL)
            .bind(member.no.as_str())
            .bind(member.profile_img.as_str())
            .bind(member.full_name.as_str())
            .bind(member.kana_name.as_str())
            .bind(member.motto.as_str())
            .bind(member.biography.as_str())
            .bind(member.start_date)
            .bind(member.end_date)
            .bind(member.employment_status_id)
            .bind(member.status_id);

        let rows = self
            .db_handler
            .query(&statement)
            .await
            .map_err(|e| MemberRepositoryError::PersistenceFailure(eyre!(e)))?;

        let row = rows.first().ok_or_else(|| {
            MemberRepositoryError::PersistenceFailure(eyre!(
                "insert returned no generated identifier"
            ))
        })?;

        let id = row.try_get_i64("id").map_err(decode_failure)?;
        let id = MemberId::new(id).map_err(|e| {
            MemberRepositoryError::PersistenceFailure(eyre!(e))
        })?;
        let created_at =
            row.try_get_timestamp("created_at").map_err(decode_failure)?;
        let updated_at =
            row.try_get_timestamp("updated_at").map_err(decode_failure)?;

        tracing::info!(member_id = %id, "member created");

        Ok(Member::from_new(id, member, created_at, updated_at))
    }

    /// Fetches a member by the string form of its identifier, with its
    /// employment status and status joined in.
    ///
    /// Identifiers that do not parse as a positive integer cannot match any
    /// row and yield `NotFound`.
    #[tracing::instrument(name = "Retrieving member by ID", skip(self))]
    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Member, MemberRepositoryError> {
        let member_id = match MemberId::parse(id) {
            Ok(member_id) => member_id,
            Err(e) => {
                tracing::debug!("{}", e);
                return Err(MemberRepositoryError::NotFound(id.to_owned()));
            }
        };

        let statement =
            Statement::new(FIND_MEMBER_BY_ID_SQL).bind(member_id.value_of());

        let rows = self
            .db_handler
            .query(&statement)
            .await
            .map_err(|e| MemberRepositoryError::PersistenceFailure(eyre!(e)))?;

        match rows.first() {
            Some(row) => map_member_row(row).map_err(decode_failure),
            None => Err(MemberRepositoryError::NotFound(id.to_owned())),
        }
    }
}

/// Maps one row of `FIND_MEMBER_BY_ID_SQL` onto a `Member`.
pub fn map_member_row(row: &Row) -> Result<Member, RowDecodeError> {
    let id = MemberId::new(row.try_get_i64("id")?).map_err(|_| {
        RowDecodeError::TypeMismatch {
            column: "id".to_owned(),
            expected: "positive bigint",
        }
    })?;
    let employment_status_id = row.try_get_i64("employment_status_id")?;
    let status_id = row.try_get_i64("status_id")?;

    let employment_status = match row
        .try_get_optional_string("employment_status_name")?
    {
        Some(name) => Some(EmploymentStatus {
            id: employment_status_id,
            name,
            created_at: row.try_get_timestamp("employment_status_created_at")?,
            updated_at: row.try_get_timestamp("employment_status_updated_at")?,
        }),
        None => None,
    };

    let status = match row.try_get_optional_string("status_name")? {
        Some(name) => Some(Status {
            id: status_id,
            name,
            created_at: row.try_get_timestamp("status_created_at")?,
            updated_at: row.try_get_timestamp("status_updated_at")?,
        }),
        None => None,
    };

    Ok(Member {
        id,
        no: row.try_get_string("no")?,
        profile_img: row.try_get_string("profile_img")?,
        full_name: row.try_get_string("full_name")?,
        kana_name: row.try_get_string("kana_name")?,
        motto: row.try_get_string("motto")?,
        biography: row.try_get_string("biography")?,
        start_date: row.try_get_timestamp("start_date")?,
        end_date: row.try_get_optional_timestamp("end_date")?,
        employment_status_id,
        status_id,
        employment_status,
        status,
        created_at: row.try_get_timestamp("created_at")?,
        updated_at: row.try_get_timestamp("updated_at")?,
    })
}

fn decode_failure(e: RowDecodeError) -> MemberRepositoryError {
    MemberRepositoryError::PersistenceFailure(eyre!(e))
}
