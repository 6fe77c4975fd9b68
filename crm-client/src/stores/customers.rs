//! Customer records: `/customers`.

use shared::models::{Customer, CustomerRequest, Page};
use shared::validation::validate_customer;
use tracing::info;
use yewdux::Dispatch;

use super::collection::{CollectionAction, CollectionState, track};
use crate::api::{ApiClient, ApiError};

pub type CustomerStore = CollectionState<Customer>;

pub const PAGE_SIZE: &str = "100";

pub async fn fetch_all(
    api: &ApiClient,
    dispatch: &Dispatch<CustomerStore>,
) -> Result<Vec<Customer>, ApiError> {
    let request = async {
        let page: Page<Customer> = api
            .get_with_query("/customers", &[("page", "0"), ("size", PAGE_SIZE)])
            .await?;
        Ok::<_, ApiError>(page.into_content())
    };
    track(dispatch, "Customers could not be loaded", request, |items| {
        CollectionAction::Loaded(items.clone())
    })
    .await
}

pub async fn fetch_by_id(
    api: &ApiClient,
    dispatch: &Dispatch<CustomerStore>,
    id: i64,
) -> Result<Customer, ApiError> {
    let path = format!("/customers/{id}");
    let request = api.get::<Customer>(&path);
    track(dispatch, "Customer could not be loaded", request, |customer| {
        CollectionAction::Selected(customer.clone())
    })
    .await
}

pub async fn create(
    api: &ApiClient,
    dispatch: &Dispatch<CustomerStore>,
    input: &CustomerRequest,
) -> Result<Customer, ApiError> {
    validate_customer(input)?;
    let request = api.post::<_, Customer>("/customers", input);
    let created = track(dispatch, "Customer could not be created", request, |customer| {
        CollectionAction::Created(customer.clone())
    })
    .await?;
    info!(customer_id = created.id, "customer created");
    Ok(created)
}

pub async fn update(
    api: &ApiClient,
    dispatch: &Dispatch<CustomerStore>,
    id: i64,
    input: &CustomerRequest,
) -> Result<Customer, ApiError> {
    validate_customer(input)?;
    let path = format!("/customers/{id}");
    let request = api.put::<_, Customer>(&path, input);
    track(dispatch, "Customer could not be updated", request, |customer| {
        CollectionAction::Updated(customer.clone())
    })
    .await
}

pub async fn delete(
    api: &ApiClient,
    dispatch: &Dispatch<CustomerStore>,
    id: i64,
) -> Result<(), ApiError> {
    let path = format!("/customers/{id}");
    let request = api.delete(&path);
    track(dispatch, "Customer could not be deleted", request, |_| {
        CollectionAction::Deleted(id)
    })
    .await?;
    info!(customer_id = id, "customer deleted");
    Ok(())
}
