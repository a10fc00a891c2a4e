//! `define_port_error!` builds a port's error enum from `Variant { field: Type } => "message"`
//! lines. Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything `Into` the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::EventId;

    define_port_error! {
        pub enum SamplePortError {
            Offline => "store offline",
            Rejected { message: String } => "rejected: {message}",
            Missing { event_id: EventId } => "event {event_id} missing",
            Mixed { message: String, attempts: u32 } => "{message} after {attempts} attempts",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
        assert_eq!(SamplePortError::offline().to_string(), "store offline");
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(SamplePortError::rejected("no").to_string(), "rejected: no");
    }

    #[test]
    fn typed_fields_accept_conversions() {
        let err = SamplePortError::missing(7_i64);
        assert_eq!(err.to_string(), "event 7 missing");
    }

    #[test]
    fn mixed_fields_keep_order() {
        let err = SamplePortError::mixed("timeout", 3_u32);
        assert_eq!(err.to_string(), "timeout after 3 attempts");
    }
}
