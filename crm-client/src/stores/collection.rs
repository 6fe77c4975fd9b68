use shared::models::Entity;
use std::future::Future;
use std::rc::Rc;
use tracing::warn;
use yewdux::{Context, Dispatch, Reducer, Store};

use crate::api::ApiError;

/// A list of entities plus the one currently opened in a detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T: Entity> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl<T: Entity> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            loading: false,
            last_error: None,
        }
    }
}

impl<T: Entity> Store for CollectionState<T> {
    fn new(_cx: &Context) -> Self {
        Self::default()
    }

    fn should_notify(&self, old: &Self) -> bool {
        self != old
    }
}

impl<T: Entity> CollectionState<T> {
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn ids(&self) -> Vec<T::Id> {
        self.items.iter().map(Entity::id).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionAction<T: Entity> {
    Pending,
    Loaded(Vec<T>),
    Selected(T),
    Created(T),
    Updated(T),
    Deleted(T::Id),
    Failed(String),
    ClearError,
    ClearSelected,
}

impl<T: Entity> Reducer<CollectionState<T>> for CollectionAction<T> {
    fn apply(self, mut state: Rc<CollectionState<T>>) -> Rc<CollectionState<T>> {
        let collection = Rc::make_mut(&mut state);
        match self {
            Self::Pending => {
                collection.loading = true;
                collection.last_error = None;
            }
            Self::Loaded(items) => {
                collection.items = items;
                collection.loading = false;
            }
            Self::Selected(item) => {
                collection.selected = Some(item);
                collection.loading = false;
            }
            Self::Created(item) => {
                let id = item.id();
                match collection.items.iter_mut().find(|existing| existing.id() == id) {
                    Some(existing) => *existing = item,
                    None => collection.items.push(item),
                }
                collection.loading = false;
            }
            Self::Updated(item) => {
                let id = item.id();
                if let Some(existing) = collection.items.iter_mut().find(|existing| existing.id() == id) {
                    *existing = item.clone();
                }
                if collection.selected.as_ref().is_some_and(|selected| selected.id() == id) {
                    collection.selected = Some(item);
                }
                collection.loading = false;
            }
            Self::Deleted(id) => {
                collection.items.retain(|item| item.id() != id);
                if collection.selected.as_ref().is_some_and(|selected| selected.id() == id) {
                    collection.selected = None;
                }
                collection.loading = false;
            }
            Self::Failed(message) => {
                collection.loading = false;
                collection.last_error = Some(message);
            }
            Self::ClearError => collection.last_error = None,
            Self::ClearSelected => collection.selected = None,
        }
        state
    }
}

/// Mark the store loading, await `request`, then record either the action
/// built from the server's answer or the failure message.
pub(crate) async fn track<T, R, Fut>(
    dispatch: &Dispatch<CollectionState<T>>,
    fallback: &str,
    request: Fut,
    on_success: impl FnOnce(&R) -> CollectionAction<T>,
) -> Result<R, ApiError>
where
    T: Entity,
    Fut: Future<Output = Result<R, ApiError>>,
{
    dispatch.apply(CollectionAction::Pending);
    match request.await {
        Ok(value) => {
            dispatch.apply(on_success(&value));
            Ok(value)
        }
        Err(err) => {
            warn!(error = %err, "{fallback}");
            dispatch.apply(CollectionAction::Failed(err.user_message(fallback)));
            Err(err)
        }
    }
}
