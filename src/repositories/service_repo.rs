//! Service catalog repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewService, Service, UpdateService};

#[derive(Clone)]
pub struct ServiceRepository {
    pool: AsyncDbPool,
}

impl ServiceRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new catalog entry.
    pub async fn create(&self, new_service: NewService) -> AppResult<Service> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(services)
            .values(&new_service)
            .returning(Service::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a service by id.
    pub async fn find_by_id(&self, service_id: i64) -> AppResult<Option<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        services
            .filter(id.eq(service_id))
            .select(Service::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists all services.
    pub async fn list_all(&self) -> AppResult<Vec<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        services
            .select(Service::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists services in the given category (exact match).
    pub async fn find_by_category(&self, service_category: &str) -> AppResult<Vec<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        services
            .filter(category.eq(service_category))
            .select(Service::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Case-insensitive substring search on the service name.
    pub async fn search_by_name(&self, term: &str) -> AppResult<Vec<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        services
            .filter(name.ilike(format!("%{}%", term)))
            .select(Service::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists all services ordered by price, cheapest first.
    pub async fn list_by_price_asc(&self) -> AppResult<Vec<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        services
            .order(price.asc())
            .select(Service::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists all services ordered by duration, shortest first.
    pub async fn list_by_duration_asc(&self) -> AppResult<Vec<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        services
            .order(duration_minutes.asc())
            .select(Service::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites a service's fields. Returns `None` when absent.
    pub async fn update(
        &self,
        service_id: i64,
        update_data: UpdateService,
    ) -> AppResult<Option<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(services.filter(id.eq(service_id)))
            .set(&update_data)
            .returning(Service::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Deletes a service, returning the number of affected rows.
    pub async fn delete(&self, service_id: i64) -> AppResult<usize> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(services.filter(id.eq(service_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
