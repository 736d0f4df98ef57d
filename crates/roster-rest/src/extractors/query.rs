//! Query-string extractors for list and search endpoints.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use roster_core::{PageRequest, RosterError};
use roster_service::{EmployeeListQuery, ListParams};
use serde::Deserialize;
use utoipa::IntoParams;

/// Paging parameters for the search endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Page size, at most 100.
    pub limit: Option<u32>,
}

async fn query_params<T, S>(parts: &mut Parts, state: &S) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned + Send,
    S: Send + Sync,
{
    Query::<T>::from_request_parts(parts, state)
        .await
        .map(|Query(params)| params)
        .map_err(|e| AppError::from(RosterError::validation(e.body_text())))
}

/// A validated `page`/`limit`/`filterField`/`filterValue` query.
#[derive(Debug, Clone)]
pub struct ListQuery(pub EmployeeListQuery);

#[async_trait]
impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params: ListParams = query_params(parts, state).await?;
        Ok(Self(EmployeeListQuery::from_params(&params)?))
    }
}

/// A validated `page`/`limit` query.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params: PageParams = query_params(parts, state).await?;
        Ok(Self(PageRequest::from_parts(params.page, params.limit)?))
    }
}
