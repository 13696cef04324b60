//! Property observation
//!
//! The web engine's navigation properties are mirrored into a
//! [`PropertyRegistry`]. Interested parties register callbacks keyed by
//! [`Property`] and hold the returned [`Observation`] for as long as they want
//! to be notified. Dropping the handle unregisters the callback, so a torn-down
//! view can never be called back.
//!
//! Registration fires the callback once with the current value (if the
//! property has one yet), then again on every change.

use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Observable properties of the embedded web surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    CanGoBack,
    CanGoForward,
    Title,
    Url,
}

impl Property {
    pub const ALL: [Property; 4] = [
        Property::CanGoBack,
        Property::CanGoForward,
        Property::Title,
        Property::Url,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::CanGoBack => "canGoBack",
            Property::CanGoForward => "canGoForward",
            Property::Title => "title",
            Property::Url => "url",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value carried by a property change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Flag(bool),
    Text(String),
}

impl PropertyValue {
    pub fn text(value: impl Into<String>) -> Self {
        PropertyValue::Text(value.into())
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            PropertyValue::Flag(flag) => Some(*flag),
            PropertyValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            PropertyValue::Flag(_) => None,
        }
    }
}

type Callback = Rc<RefCell<dyn FnMut(&PropertyValue)>>;

struct Observer {
    id: u64,
    property: Property,
    callback: Callback,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    values: HashMap<Property, PropertyValue>,
    observers: Vec<Observer>,
}

impl RegistryInner {
    fn is_registered(&self, id: u64) -> bool {
        self.observers.iter().any(|o| o.id == id)
    }
}

/// Current property values plus the callbacks observing them
#[derive(Clone, Default)]
pub struct PropertyRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for changes of `property`.
    ///
    /// The callback runs immediately with the current value when one has been
    /// published, then after every change until the returned handle is
    /// dropped.
    #[must_use = "dropping the Observation unregisters the callback"]
    pub fn observe<F>(&self, property: Property, callback: F) -> Observation
    where
        F: FnMut(&PropertyValue) + 'static,
    {
        let callback: Callback = Rc::new(RefCell::new(callback));
        let (id, seed) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.observers.push(Observer {
                id,
                property,
                callback: Rc::clone(&callback),
            });
            (id, inner.values.get(&property).cloned())
        };
        trace!("observer {} registered for {}", id, property);

        if let Some(value) = seed {
            let mut callback = callback.borrow_mut();
            (*callback)(&value);
        }

        Observation {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Store a new value and notify observers if it differs from the old one.
    ///
    /// Returns whether the value changed.
    pub fn publish(&self, property: Property, value: PropertyValue) -> bool {
        let callbacks: Vec<(u64, Callback)> = {
            let mut inner = self.inner.borrow_mut();
            if inner.values.get(&property) == Some(&value) {
                return false;
            }
            inner.values.insert(property, value.clone());
            inner
                .observers
                .iter()
                .filter(|o| o.property == property)
                .map(|o| (o.id, Rc::clone(&o.callback)))
                .collect()
        };

        for (id, callback) in callbacks {
            // An earlier callback in this round may have cancelled this one.
            if !self.inner.borrow().is_registered(id) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut callback) => (*callback)(&value),
                Err(_) => trace!("observer {} re-entered while publishing {}", id, property),
            }
        }
        true
    }

    pub fn get(&self, property: Property) -> Option<PropertyValue> {
        self.inner.borrow().values.get(&property).cloned()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }
}

/// Registration handle returned by [`PropertyRegistry::observe`]
#[derive(Debug)]
pub struct Observation {
    id: u64,
    registry: Weak<RefCell<RegistryInner>>,
}

impl Observation {
    /// Unregister now instead of at drop
    pub fn cancel(self) {}
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.borrow_mut().observers.retain(|o| o.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<PropertyValue>>>, impl FnMut(&PropertyValue)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &PropertyValue| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn test_observe_seeds_current_value() {
        let registry = PropertyRegistry::new();
        registry.publish(Property::CanGoBack, PropertyValue::Flag(false));

        let (seen, callback) = recorder();
        let _observation = registry.observe(Property::CanGoBack, callback);

        assert_eq!(*seen.borrow(), vec![PropertyValue::Flag(false)]);
    }

    #[test]
    fn test_observe_without_value_does_not_fire() {
        let registry = PropertyRegistry::new();
        let (seen, callback) = recorder();
        let _observation = registry.observe(Property::Title, callback);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_publish_notifies_only_matching_property() {
        let registry = PropertyRegistry::new();
        let (titles, on_title) = recorder();
        let (urls, on_url) = recorder();
        let _a = registry.observe(Property::Title, on_title);
        let _b = registry.observe(Property::Url, on_url);

        registry.publish(Property::Title, PropertyValue::text("Home"));

        assert_eq!(*titles.borrow(), vec![PropertyValue::text("Home")]);
        assert!(urls.borrow().is_empty());
    }

    #[test]
    fn test_unchanged_value_is_not_republished() {
        let registry = PropertyRegistry::new();
        let (seen, callback) = recorder();
        let _observation = registry.observe(Property::Url, callback);

        assert!(registry.publish(Property::Url, PropertyValue::text("https://a.test/")));
        assert!(!registry.publish(Property::Url, PropertyValue::text("https://a.test/")));

        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_dropping_observation_unsubscribes() {
        let registry = PropertyRegistry::new();
        let (seen, callback) = recorder();
        let observation = registry.observe(Property::Title, callback);
        assert_eq!(registry.observer_count(), 1);

        observation.cancel();
        assert_eq!(registry.observer_count(), 0);

        registry.publish(Property::Title, PropertyValue::text("Late"));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_observation_outliving_registry_is_harmless() {
        let registry = PropertyRegistry::new();
        let observation = registry.observe(Property::Title, |_| {});
        drop(registry);
        drop(observation);
    }

    #[test]
    fn test_callback_may_cancel_sibling() {
        let registry = PropertyRegistry::new();
        let slot: Rc<RefCell<Option<Observation>>> = Rc::new(RefCell::new(None));

        let slot_for_first = Rc::clone(&slot);
        let _first = registry.observe(Property::Title, move |_| {
            slot_for_first.borrow_mut().take();
        });
        let (seen, callback) = recorder();
        *slot.borrow_mut() = Some(registry.observe(Property::Title, callback));

        registry.publish(Property::Title, PropertyValue::text("x"));

        assert!(seen.borrow().is_empty());
        assert_eq!(registry.observer_count(), 1);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(PropertyValue::Flag(true).as_flag(), Some(true));
        assert_eq!(PropertyValue::Flag(true).as_text(), None);
        assert_eq!(PropertyValue::text("t").as_text(), Some("t"));
        assert_eq!(Property::CanGoForward.to_string(), "canGoForward");
    }
}
