//! Service catalog business logic.
//!
//! Named "catalog" to keep the bookable-service entity distinct from
//! this business-logic layer.

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{NewService, Service, UpdateService};
use crate::repositories::ServiceRepository;

/// Sort orders supported by the service listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceSort {
    Price,
    Duration,
}

#[derive(Clone)]
pub struct CatalogService {
    repo: ServiceRepository,
}

impl CatalogService {
    pub fn new(repo: ServiceRepository) -> Self {
        Self { repo }
    }

    pub async fn create_service(&self, new_service: NewService) -> AppResult<Service> {
        let service = self.repo.create(new_service).await?;
        info!(service_id = service.id, "Service created");
        Ok(service)
    }

    pub async fn get_service(&self, id: i64) -> AppResult<Service> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("service", id))
    }

    pub async fn list_services(&self) -> AppResult<Vec<Service>> {
        self.repo.list_all().await
    }

    pub async fn list_services_by_category(&self, category: &str) -> AppResult<Vec<Service>> {
        self.repo.find_by_category(category).await
    }

    /// Case-insensitive substring search on the service name.
    pub async fn search_services(&self, term: &str) -> AppResult<Vec<Service>> {
        self.repo.search_by_name(term).await
    }

    pub async fn list_services_sorted(&self, sort: ServiceSort) -> AppResult<Vec<Service>> {
        match sort {
            ServiceSort::Price => self.repo.list_by_price_asc().await,
            ServiceSort::Duration => self.repo.list_by_duration_asc().await,
        }
    }

    pub async fn update_service(&self, id: i64, update_data: UpdateService) -> AppResult<Service> {
        self.repo
            .update(id, update_data)
            .await?
            .ok_or_else(|| AppError::not_found("service", id))
    }

    pub async fn delete_service(&self, id: i64) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("service", id));
        }
        info!(service_id = id, "Service deleted");
        Ok(())
    }
}
