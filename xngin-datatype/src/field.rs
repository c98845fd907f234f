use crate::PreciseType;
use std::fmt;

/// Nullability and precise type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldType {
    pub nullable: bool,
    pub ty: PreciseType,
}

impl FieldType {
    #[inline]
    pub fn new(nullable: bool, ty: PreciseType) -> Self {
        FieldType { nullable, ty }
    }

    #[inline]
    pub fn nullable(ty: PreciseType) -> Self {
        Self::new(true, ty)
    }

    #[inline]
    pub fn not_nullable(ty: PreciseType) -> Self {
        Self::new(false, ty)
    }
}

/// Field describes a named column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    field_type: FieldType,
}

impl Field {
    #[inline]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Field {
            name: name.into(),
            field_type,
        }
    }

    #[inline]
    pub fn nullable(name: impl Into<String>, ty: PreciseType) -> Self {
        Self::new(name, FieldType::nullable(ty))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.field_type.nullable
    }

    #[inline]
    pub fn ty(&self) -> PreciseType {
        self.field_type.ty
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.field_type.ty.to_lower())?;
        if !self.field_type.nullable {
            f.write_str(" not null")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_display() {
        let f = Field::nullable("c0", PreciseType::u64());
        assert_eq!("c0: uint(8)", f.to_string());
        assert!(f.is_nullable());
        let f = Field::new("c1", FieldType::not_nullable(PreciseType::f32()));
        assert_eq!("c1: float(4) not null", f.to_string());
        assert_eq!(PreciseType::f32(), f.ty());
        assert_eq!(FieldType::not_nullable(PreciseType::f32()), f.field_type());
        let ft = FieldType::new(true, PreciseType::i8());
        assert_eq!(FieldType::nullable(PreciseType::i8()), ft);
        assert_eq!("c2: int(1)", Field::new("c2", ft).to_string());
    }
}
