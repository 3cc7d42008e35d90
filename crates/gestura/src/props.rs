//! Gesture props: named callback props split from passthrough props.
//!
//! A component receives a flat list of named props. Names of the form
//! `on<Gesture>[<Phase>]` (`onClick`, `onMenu`, `onDragStart`, ...) are
//! gesture callbacks and go into a [`CallbackRegistry`]; everything else is
//! handed through to the wrapped component untouched.

use gestura_core::{Callback, CallbackRegistry, GestureError, GestureKind, Phase, RawEvent};
use std::fmt;
use std::rc::Rc;

/// Prop-name prefixes of the supported gestures.
const GESTURE_PREFIXES: [(&str, GestureKind); 4] = [
    ("onClick", GestureKind::Click),
    ("onDblclick", GestureKind::Dblclick),
    ("onMenu", GestureKind::Menu),
    ("onDrag", GestureKind::Drag),
];

/// Split a prop name into its gesture kind and phase suffix.
///
/// Returns `None` when the name does not address a gesture. The suffix is
/// empty for names without a phase, e.g. `onClick`.
///
/// ```
/// use gestura::split_handler_name;
/// use gestura::GestureKind;
///
/// assert_eq!(split_handler_name("onDragStart"), Some((GestureKind::Drag, "Start")));
/// assert_eq!(split_handler_name("onMenu"), Some((GestureKind::Menu, "")));
/// assert_eq!(split_handler_name("onClickable"), None);
/// assert_eq!(split_handler_name("testProp"), None);
/// ```
pub fn split_handler_name(name: &str) -> Option<(GestureKind, &str)> {
    GESTURE_PREFIXES.iter().find_map(|(prefix, kind)| {
        let rest = name.strip_prefix(prefix)?;
        // The gesture word ends at the next capital letter.
        let bounded = rest.chars().next().map_or(true, |c| c.is_ascii_uppercase());
        bounded.then_some((*kind, rest))
    })
}

/// Resolve a prop name to a gesture kind and phase.
///
/// `Ok(None)` means the prop is not a gesture callback. A missing phase
/// suffix means [`Phase::Default`]; phase suffixes match case-insensitively.
pub fn parse_handler_name(name: &str) -> Result<Option<(GestureKind, Phase)>, GestureError> {
    let Some((kind, suffix)) = split_handler_name(name) else {
        return Ok(None);
    };
    let phase = if suffix.is_empty() {
        Phase::Default
    } else {
        suffix.parse()?
    };
    if !kind.emits(phase) {
        return Err(GestureError::PhaseNotSupported { kind, phase });
    }
    Ok(Some((kind, phase)))
}

/// A prop value: a callback or an arbitrary passthrough value.
pub enum Prop<P> {
    /// Event callback
    Callback(Callback),
    /// Any other value
    Value(P),
}

impl<P: Clone> Clone for Prop<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Callback(callback) => Self::Callback(Rc::clone(callback)),
            Self::Value(value) => Self::Value(value.clone()),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Prop<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Named props of a component, in insertion order.
#[derive(Clone)]
pub struct GestureProps<P> {
    props: Vec<(String, Prop<P>)>,
}

impl<P> Default for GestureProps<P> {
    fn default() -> Self {
        Self { props: Vec::new() }
    }
}

impl<P> GestureProps<P> {
    /// Create an empty prop list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prop, replacing a previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, prop: Prop<P>) {
        let name = name.into();
        match self.props.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = prop,
            None => self.props.push((name, prop)),
        }
    }

    /// Builder: callback prop.
    pub fn callback(mut self, name: impl Into<String>, callback: impl Fn(&RawEvent) + 'static) -> Self {
        self.insert(name, Prop::Callback(Rc::new(callback)));
        self
    }

    /// Builder: passthrough value prop.
    pub fn value(mut self, name: impl Into<String>, value: P) -> Self {
        self.insert(name, Prop::Value(value));
        self
    }

    /// Prop named `name`.
    pub fn get(&self, name: &str) -> Option<&Prop<P>> {
        self.props
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, prop)| prop)
    }

    /// Passthrough value named `name`.
    pub fn get_value(&self, name: &str) -> Option<&P> {
        match self.get(name) {
            Some(Prop::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Prop names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.props.iter().map(|(name, _)| name.as_str())
    }

    /// Number of props.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Check if there are no props.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Separate gesture callbacks from passthrough props.
    ///
    /// Gesture-named callbacks are registered in prop order. A gesture name
    /// holding a plain value is passed through. A callback under a gesture
    /// name with an unknown phase, or a phase the gesture never emits, is
    /// logged and dropped.
    pub fn split(self) -> (CallbackRegistry, Self) {
        let mut registry = CallbackRegistry::new();
        let mut passthrough = Self::new();
        for (name, prop) in self.props {
            match (parse_handler_name(&name), prop) {
                (Ok(Some((kind, phase))), Prop::Callback(callback)) => {
                    if let Err(error) = registry.insert(kind, phase, callback) {
                        tracing::warn!(prop = %name, %error, "gesture callback skipped");
                    }
                }
                (Err(error), Prop::Callback(_)) => {
                    tracing::warn!(prop = %name, %error, "gesture callback skipped");
                }
                (_, prop) => passthrough.props.push((name, prop)),
            }
        }
        tracing::trace!(
            gestures = registry.len(),
            passthrough = passthrough.len(),
            "props split"
        );
        (registry, passthrough)
    }
}

impl<P: fmt::Debug> fmt::Debug for GestureProps<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.props.iter().map(|(name, prop)| (name, prop)))
            .finish()
    }
}
