//! Descriptors of resolved methods and classes.

use g2j_common::JavaType;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: JavaType,
    #[serde(default)]
    pub varargs: bool,
}

impl ParamInfo {
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        Self {
            name: name.into(),
            ty,
            varargs: false,
        }
    }

    pub fn varargs(name: impl Into<String>, element: JavaType) -> Self {
        Self {
            name: name.into(),
            ty: JavaType::array(element),
            varargs: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MethodKind {
    #[default]
    Regular,
    Constructor,
    /// Groovy extension method declared on a receiver type but implemented
    /// as a static method of `owner` taking the receiver first.
    Gdk { owner: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    pub name: String,
    #[serde(default)]
    pub containing_class: Option<String>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default)]
    pub params: Vec<ParamInfo>,
    #[serde(default)]
    pub return_type: Option<JavaType>,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            containing_class: None,
            is_static: false,
            kind: MethodKind::Regular,
            params: Vec::new(),
            return_type: None,
        }
    }

    pub fn constructor(class: impl Into<String>, params: Vec<ParamInfo>) -> Self {
        let class = class.into();
        Self {
            name: g2j_common::names::simple_name(&class).to_string(),
            containing_class: Some(class),
            is_static: false,
            kind: MethodKind::Constructor,
            params,
            return_type: None,
        }
    }

    pub fn in_class(mut self, class: impl Into<String>) -> Self {
        self.containing_class = Some(class.into());
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn gdk(mut self, owner: impl Into<String>) -> Self {
        self.kind = MethodKind::Gdk {
            owner: owner.into(),
        };
        self
    }

    pub fn with_params(mut self, params: Vec<ParamInfo>) -> Self {
        self.params = params;
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MethodKind::Constructor
    }

    /// A GDK method called with instance syntax (`list.sum()`).
    pub fn is_gdk_instance(&self) -> bool {
        matches!(self.kind, MethodKind::Gdk { .. }) && !self.is_static
    }

    pub fn is_varargs(&self) -> bool {
        self.params.last().is_some_and(|p| p.varargs)
    }

    /// Whether the first parameter receives Groovy's named-argument map.
    pub fn accepts_leading_map(&self) -> bool {
        self.params.first().is_some_and(|p| p.ty.is_map_like())
    }

    /// The static method implementing a GDK instance method: same name, on
    /// the owner class, with the receiver (and, when named arguments are
    /// passed, their map) prepended to the parameters.
    pub fn gdk_static_form(&self, receiver: JavaType, with_named_map: bool) -> MethodInfo {
        let owner = match &self.kind {
            MethodKind::Gdk { owner } => Some(owner.clone()),
            _ => self.containing_class.clone(),
        };
        let mut params = Vec::with_capacity(self.params.len() + 2);
        params.push(ParamInfo::new("self", receiver));
        if with_named_map {
            params.push(ParamInfo::new(
                "namedArgs",
                JavaType::class(g2j_common::names::JAVA_UTIL_MAP),
            ));
        }
        params.extend(self.params.iter().cloned());
        MethodInfo {
            name: self.name.clone(),
            containing_class: owner,
            is_static: true,
            kind: MethodKind::Regular,
            params,
            return_type: self.return_type.clone(),
        }
    }
}

/// Type-parameter bindings in effect for a resolved method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Substitutor {
    bindings: FxHashMap<String, JavaType>,
}

impl Substitutor {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bind(mut self, variable: impl Into<String>, ty: JavaType) -> Self {
        self.bindings.insert(variable.into(), ty);
        self
    }

    pub fn apply(&self, ty: &JavaType) -> JavaType {
        ty.substitute(&self.bindings)
    }
}

/// A method together with the substitution it was resolved under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRef {
    pub method: MethodInfo,
    #[serde(default)]
    pub substitutor: Substitutor,
}

impl MethodRef {
    pub fn new(method: MethodInfo) -> Self {
        Self {
            method,
            substitutor: Substitutor::empty(),
        }
    }

    pub fn with_substitutor(method: MethodInfo, substitutor: Substitutor) -> Self {
        Self {
            method,
            substitutor,
        }
    }

    /// Parameters with type variables replaced.
    pub fn signature(&self) -> Vec<ParamInfo> {
        self.method
            .params
            .iter()
            .map(|param| ParamInfo {
                name: param.name.clone(),
                ty: self.substitutor.apply(&param.ty),
                varargs: param.varargs,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub qualified_name: String,
    /// `false` when the class declares no constructor at all, in which case
    /// the implicit no-argument constructor applies.
    #[serde(default)]
    pub has_constructors: bool,
}

impl ClassInfo {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            has_constructors: false,
        }
    }
}
