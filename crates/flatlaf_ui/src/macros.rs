//! Descriptor shorthands for the styleable tables
//!
//! Each macro expands to a [`flatlaf_style::StyleableProperty`] for one
//! field of the given type.

/// `Option<Color>` field
macro_rules! color_property {
    ($ty:ty, $key:literal, $field:ident) => {
        ::flatlaf_style::StyleableProperty::new(
            $key,
            ::flatlaf_style::ValueType::Color,
            |t: &$ty| t.$field.into(),
            |t: &mut $ty, v| {
                t.$field = v.as_color();
                Ok(())
            },
        )
    };
}

/// `i32` field
macro_rules! int_property {
    ($ty:ty, $key:literal, $field:ident) => {
        ::flatlaf_style::StyleableProperty::new(
            $key,
            ::flatlaf_style::ValueType::Integer,
            |t: &$ty| t.$field.into(),
            |t: &mut $ty, v| {
                t.$field = v.as_int().unwrap_or_default();
                Ok(())
            },
        )
    };
}

/// `f32` field, integers are widened
macro_rules! float_property {
    ($ty:ty, $key:literal, $field:ident) => {
        ::flatlaf_style::StyleableProperty::new(
            $key,
            ::flatlaf_style::ValueType::Float,
            |t: &$ty| t.$field.into(),
            |t: &mut $ty, v| {
                t.$field = v.as_float().unwrap_or_default();
                Ok(())
            },
        )
    };
}

/// `bool` field
macro_rules! bool_property {
    ($ty:ty, $key:literal, $field:ident) => {
        ::flatlaf_style::StyleableProperty::new(
            $key,
            ::flatlaf_style::ValueType::Boolean,
            |t: &$ty| t.$field.into(),
            |t: &mut $ty, v| {
                t.$field = v.as_bool().unwrap_or_default();
                Ok(())
            },
        )
    };
}

/// `Option<Insets>` field
macro_rules! insets_property {
    ($ty:ty, $key:literal, $field:ident) => {
        ::flatlaf_style::StyleableProperty::new(
            $key,
            ::flatlaf_style::ValueType::Insets,
            |t: &$ty| t.$field.into(),
            |t: &mut $ty, v| {
                t.$field = v.as_insets();
                Ok(())
            },
        )
    };
}
