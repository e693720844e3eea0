//! Credential lookups. The backend never writes this table.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entities::credentials;
use crate::errors::domain::DomainError;

/// Secret of the credential row tagged `kind`, if provisioned.
pub async fn find_secret_by_type<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kind: &str,
) -> Result<Option<String>, DomainError> {
    let credential = credentials::Entity::find()
        .filter(credentials::Column::Kind.eq(kind))
        .one(conn)
        .await?;
    Ok(credential.map(|c| c.secret))
}

#[cfg(test)]
mod tests {
    use migration::{provision_signing_key, SIGNING_KEY_CREDENTIAL_TYPE};

    use super::find_secret_by_type;
    use crate::infra::db::bootstrap_db;

    #[tokio::test]
    async fn secret_is_found_by_type_tag() {
        let conn = bootstrap_db("sqlite::memory:").await.unwrap();
        assert_eq!(
            find_secret_by_type(&conn, SIGNING_KEY_CREDENTIAL_TYPE)
                .await
                .unwrap(),
            None
        );

        provision_signing_key(&conn, "first").await.unwrap();
        provision_signing_key(&conn, "second").await.unwrap();

        assert_eq!(
            find_secret_by_type(&conn, SIGNING_KEY_CREDENTIAL_TYPE)
                .await
                .unwrap()
                .as_deref(),
            Some("second")
        );
        assert_eq!(find_secret_by_type(&conn, "other").await.unwrap(), None);
    }
}
