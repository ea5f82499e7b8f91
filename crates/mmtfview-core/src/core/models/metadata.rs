use crate::core::io::container::{Container, FieldValue, float_list, int_list, keys, string_list, wrong_kind};
use crate::core::io::error::FieldError;
use nalgebra::Matrix4;

/// Crystallographic unit cell: edge lengths in Ångström, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl UnitCell {
    fn from_field(value: &FieldValue) -> Result<Self, FieldError> {
        let v = float_list(keys::UNIT_CELL, value)?;
        match v.as_slice() {
            [a, b, c, alpha, beta, gamma] => Ok(Self {
                a: *a as f32,
                b: *b as f32,
                c: *c as f32,
                alpha: *alpha as f32,
                beta: *beta as f32,
                gamma: *gamma as f32,
            }),
            _ => Err(FieldError::invalid(
                keys::UNIT_CELL,
                format!("expected 6 values, found {}", v.len()),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyTransform {
    pub chain_indices: Vec<usize>,
    pub matrix: Matrix4<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BioAssembly {
    pub name: String,
    pub transforms: Vec<AssemblyTransform>,
}

/// Descriptive fields of a structure that play no part in indexing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureMetadata {
    pub structure_id: Option<String>,
    pub mmtf_version: String,
    pub mmtf_producer: String,
    pub title: Option<String>,
    pub deposition_date: Option<String>,
    pub release_date: Option<String>,
    pub unit_cell: Option<UnitCell>,
    pub space_group: Option<String>,
    pub resolution: Option<f32>,
    pub r_free: Option<f32>,
    pub r_work: Option<f32>,
    pub experimental_methods: Vec<String>,
    pub ncs_operators: Vec<Matrix4<f32>>,
    pub bio_assemblies: Vec<BioAssembly>,
}

impl StructureMetadata {
    /// Reads the metadata fields of a container. Version and producer are required.
    pub fn from_container(container: &Container) -> Result<Self, FieldError> {
        let owned = |key: &str| -> Result<Option<String>, FieldError> {
            Ok(container.optional_str(key)?.map(str::to_string))
        };
        let real = |key: &str| -> Result<Option<f32>, FieldError> {
            Ok(container.optional_f64(key)?.map(|v| v as f32))
        };

        let ncs_operators = match container.optional_array(keys::NCS_OPERATOR_LIST)? {
            None => Vec::new(),
            Some(list) => list
                .iter()
                .map(|m| matrix(keys::NCS_OPERATOR_LIST, m))
                .collect::<Result<Vec<_>, _>>()?,
        };
        let bio_assemblies = match container.optional_array(keys::BIO_ASSEMBLY_LIST)? {
            None => Vec::new(),
            Some(list) => list
                .iter()
                .map(bio_assembly)
                .collect::<Result<Vec<_>, _>>()?,
        };
        let experimental_methods = match container.get(keys::EXPERIMENTAL_METHODS) {
            None => Vec::new(),
            Some(v) => string_list(keys::EXPERIMENTAL_METHODS, v)?,
        };
        let unit_cell = container
            .get(keys::UNIT_CELL)
            .map(UnitCell::from_field)
            .transpose()?;

        Ok(Self {
            structure_id: owned(keys::STRUCTURE_ID)?,
            mmtf_version: container.require_str(keys::MMTF_VERSION)?.to_string(),
            mmtf_producer: container.require_str(keys::MMTF_PRODUCER)?.to_string(),
            title: owned(keys::TITLE)?,
            deposition_date: owned(keys::DEPOSITION_DATE)?,
            release_date: owned(keys::RELEASE_DATE)?,
            unit_cell,
            space_group: owned(keys::SPACE_GROUP)?,
            resolution: real(keys::RESOLUTION)?,
            r_free: real(keys::R_FREE)?,
            r_work: real(keys::R_WORK)?,
            experimental_methods,
            ncs_operators,
            bio_assemblies,
        })
    }
}

/// Reads 16 numbers in column-major order.
fn matrix(field: &str, value: &FieldValue) -> Result<Matrix4<f32>, FieldError> {
    let v = float_list(field, value)?;
    if v.len() != 16 {
        return Err(FieldError::invalid(
            field,
            format!("a 4x4 matrix needs 16 values, found {}", v.len()),
        ));
    }
    let values: Vec<f32> = v.into_iter().map(|x| x as f32).collect();
    Ok(Matrix4::from_column_slice(&values))
}

fn bio_assembly(value: &FieldValue) -> Result<BioAssembly, FieldError> {
    let field = keys::BIO_ASSEMBLY_LIST;
    let name = match value.get(keys::NAME) {
        Some(FieldValue::Str(s)) => s.clone(),
        Some(FieldValue::Int(i)) => i.to_string(),
        Some(other) => return Err(wrong_kind(field, "string", other)),
        None => String::new(),
    };
    let transforms = match value.get(keys::TRANSFORM_LIST) {
        None | Some(FieldValue::Nil) => Vec::new(),
        Some(list) => list
            .as_array()
            .ok_or_else(|| wrong_kind(field, "array", list))?
            .iter()
            .map(|t| {
                let chains = t
                    .get(keys::CHAIN_INDEX_LIST)
                    .ok_or_else(|| FieldError::Missing(format!("{field}.{}", keys::CHAIN_INDEX_LIST)))?;
                let chain_indices = int_list(field, chains)?
                    .into_iter()
                    .map(|i| {
                        usize::try_from(i)
                            .map_err(|_| FieldError::invalid(field, format!("negative chain index {i}")))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let m = t
                    .get(keys::MATRIX)
                    .ok_or_else(|| FieldError::Missing(format!("{field}.{}", keys::MATRIX)))?;
                Ok(AssemblyTransform {
                    chain_indices,
                    matrix: matrix(field, m)?,
                })
            })
            .collect::<Result<Vec<_>, FieldError>>()?,
    };
    Ok(BioAssembly { name, transforms })
}
