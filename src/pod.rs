use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use serde_json::Value;

use crate::dynamic::DynamicObject;

/// Why a [`DynamicObject`] could not be read as a pod.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("object has no metadata.name")]
    MissingName,
    #[error("pod {pod}: spec.containers is not a list")]
    ContainersNotAList { pod: String },
    #[error("pod {pod}: container #{index} has no image")]
    MissingImage { pod: String, index: usize },
}

/// The fields of a pod that get printed.
#[derive(Debug, Clone, PartialEq)]
pub struct PodView {
    pub name: String,
    pub created: Option<Time>,
    /// One image per container, in the order the pod declares them.
    pub images: Vec<String>,
}

impl TryFrom<&DynamicObject> for PodView {
    type Error = ExtractError;

    fn try_from(object: &DynamicObject) -> Result<Self, Self::Error> {
        let name = object.name().ok_or(ExtractError::MissingName)?.to_string();

        let images = match object.pointer("spec.containers") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(containers)) => containers
                .iter()
                .enumerate()
                .map(|(index, container)| {
                    container
                        .get("image")
                        .and_then(Value::as_str)
                        .map(String::from)
                        .ok_or_else(|| ExtractError::MissingImage {
                            pod: name.clone(),
                            index,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(ExtractError::ContainersNotAList { pod: name }),
        };

        Ok(Self {
            name,
            created: object.metadata.creation_timestamp.clone(),
            images,
        })
    }
}
