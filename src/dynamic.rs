use std::borrow::Cow;

use kube::{
    Resource,
    api::{ObjectMeta, TypeMeta},
    core::DynamicResourceScope,
};

use crate::catalog::ResourceKind;

/// Note about own `DynamicObject` instead of `kube::api::DynamicObject`.
/// The original `kube::api::DynamicObject` is keyed by `kube::api::ApiResource`,
/// which has to be assembled at runtime from owned strings.
///
/// The kinds reported here are all known up front, so this object is keyed by the
/// `Copy` [`ResourceKind`] from the catalog instead, and the catalog entry can be
/// handed straight to `Api::namespaced_with`.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct DynamicObject {
    /// The type fields, not always present
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    /// Object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// All other keys
    #[serde(flatten)]
    pub data: serde_json::Value,
}

impl DynamicObject {
    /// Name from metadata, if the server sent one.
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    /// Walk a dotted path (`spec.containers`) through the untyped body.
    pub fn pointer(&self, path: &str) -> Option<&serde_json::Value> {
        path.split('.')
            .try_fold(&self.data, |value, segment| value.get(segment))
    }
}

impl Resource for DynamicObject {
    type DynamicType = ResourceKind;
    type Scope = DynamicResourceScope;

    fn group(dt: &ResourceKind) -> Cow<'_, str> {
        dt.group.into()
    }

    fn version(dt: &ResourceKind) -> Cow<'_, str> {
        dt.version.into()
    }

    fn kind(dt: &ResourceKind) -> Cow<'_, str> {
        dt.kind.into()
    }

    fn api_version(dt: &ResourceKind) -> Cow<'_, str> {
        // NOTE: The core group has no prefix in the apiVersion.
        dt.api_version().into()
    }

    fn plural(dt: &ResourceKind) -> Cow<'_, str> {
        dt.plural.into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
