use formular_core::{
    models::{Company, Contact, Subsidiary},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct SubsidiaryRow {
    id: Uuid,
    company_id: Uuid,
    name: String,
    legal_form: String,
    street: Option<String>,
    house_number: Option<String>,
    postal_code: Option<String>,
    city: Option<String>,
    country: Option<String>,
    register_court: Option<String>,
    register_number: Option<String>,
}

impl From<SubsidiaryRow> for Subsidiary {
    fn from(row: SubsidiaryRow) -> Self {
        Subsidiary {
            id: row.id,
            company_id: row.company_id,
            name: row.name,
            legal_form: row.legal_form,
            street: row.street,
            house_number: row.house_number,
            postal_code: row.postal_code,
            city: row.city,
            country: row.country,
            register_court: row.register_court,
            register_number: row.register_number,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    subsidiary_id: Uuid,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    categories: Vec<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            subsidiary_id: row.subsidiary_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            categories: row.categories,
        }
    }
}

/// Repository for subsidiary master data and attached contacts
#[derive(Clone)]
pub struct SubsidiaryRepository {
    pool: PgPool,
}

impl SubsidiaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get subsidiary by ID
    #[tracing::instrument(skip(self), fields(db.table = "subsidiaries", db.operation = "select", db.record_id = %id))]
    pub async fn get_subsidiary(&self, id: Uuid) -> Result<Option<Subsidiary>, AppError> {
        let row = sqlx::query_as::<Postgres, SubsidiaryRow>(
            r#"
            SELECT id, company_id, name, legal_form, street, house_number,
                   postal_code, city, country, register_court, register_number
            FROM subsidiaries WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Subsidiary::from))
    }

    /// Get the company a subsidiary belongs to
    #[tracing::instrument(skip(self), fields(db.table = "companies", db.operation = "select", db.record_id = %company_id))]
    pub async fn get_company(&self, company_id: Uuid) -> Result<Option<Company>, AppError> {
        let row = sqlx::query_as::<Postgres, CompanyRow>(
            "SELECT id, name FROM companies WHERE id = $1",
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Company {
            id: r.id,
            name: r.name,
        }))
    }

    /// List contacts attached to a subsidiary
    #[tracing::instrument(skip(self), fields(db.table = "contacts", db.operation = "select"))]
    pub async fn list_contacts(&self, subsidiary_id: Uuid) -> Result<Vec<Contact>, AppError> {
        let rows = sqlx::query_as::<Postgres, ContactRow>(
            r#"
            SELECT id, subsidiary_id, first_name, last_name, email, phone, categories
            FROM contacts WHERE subsidiary_id = $1 ORDER BY last_name, first_name
            "#,
        )
        .bind(subsidiary_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }
}
