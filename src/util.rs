//! Macros used across the crate which needed a home

/// Builder-style setters which consume and return `self`, carrying any doc comments along.
macro_rules! setters {
    ( $(
        $( #[$meta:meta] )*
        $name:ident ( $pname:ident: $ptype:ty ) => $field:ident
    ),* $(,)? ) => {
        $(
            $( #[$meta] )*
            pub fn $name(mut self, $pname: $ptype) -> Self {
                self.$field = $pname;
                self
            }
        )*
    };
}

/// A `Debug` impl which prints some fields and marks the rest as elided, for structs holding things that can't (or
/// shouldn't) be printed, like trait objects and RNG state.
macro_rules! abbrev_debug {
    (
        $class:ident;
        $( write $shown:ident, )*
        $( ignore $hidden:ident, )*
    ) => {
        impl fmt::Debug for $class {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // a renamed field breaks the build here instead of going quietly missing
                $( let _ = &self.$hidden; )*
                f.debug_struct(stringify!($class))
                    $( .field(stringify!($shown), &self.$shown) )*
                    .finish_non_exhaustive()
            }
        }
    };
}

pub(crate) use {abbrev_debug, setters};
