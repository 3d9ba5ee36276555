use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Debug, Write as _};

/// Renders the arguments of a logged call.
pub trait CallArgs {
    fn positional(&self) -> String;

    fn keyword(&self) -> String {
        "{}".to_string()
    }
}

macro_rules! tuple_args {
    ($($name:ident),*) => {
        impl<$($name: Debug),*> CallArgs for ($($name,)*) {
            fn positional(&self) -> String {
                format!("{:?}", self)
            }
        }
    };
}

tuple_args!();
tuple_args!(A);
tuple_args!(A, B);
tuple_args!(A, B, C);
tuple_args!(A, B, C, D);

/// Positional tuple plus named arguments, for callables that take both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WithKeywords<P> {
    pub positional: P,
    pub keyword: BTreeMap<String, Value>,
}

impl<P> WithKeywords<P> {
    pub fn new(positional: P) -> Self {
        Self {
            positional,
            keyword: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }
}

impl<P: CallArgs> CallArgs for WithKeywords<P> {
    fn positional(&self) -> String {
        self.positional.positional()
    }

    fn keyword(&self) -> String {
        let mut out = String::from("{");
        for (idx, (name, value)) in self.keyword.iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{name:?}: {value}");
        }
        out.push('}');
        out
    }
}
