use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

// Application data registered on the road, shared by every request.
#[derive(Debug, Default)]
pub(crate) struct DataMap {
    inner: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl DataMap {
    pub fn new() -> DataMap {
        DataMap::default()
    }

    pub fn insert<T: Send + Sync + 'static>(&mut self, val: T) {
        self.inner.insert(TypeId::of::<T>(), Box::new(val));
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.inner.get(&TypeId::of::<T>()).and_then(|boxed| boxed.downcast_ref::<T>())
    }
}

// The handle inserted into every request's extensions.
#[derive(Debug, Clone)]
pub(crate) struct SharedDataMap {
    pub(crate) inner: Arc<DataMap>,
}

impl SharedDataMap {
    pub fn new(inner: Arc<DataMap>) -> SharedDataMap {
        SharedDataMap { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_store_one_value_per_type() {
        let mut map = DataMap::new();
        map.insert(100_u64);
        map.insert(String::from("road"));
        map.insert(200_u64);

        assert_eq!(map.get::<u64>(), Some(&200));
        assert_eq!(map.get::<String>().map(String::as_str), Some("road"));
        assert_eq!(map.get::<i32>(), None);
    }
}
