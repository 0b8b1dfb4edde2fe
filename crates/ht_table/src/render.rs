//! Slot-indexed textual rendering shared by all tables.
//!
//! A table renders as `[<slot0>, <slot1>, ...]`, one token per physical slot.
//! Keys and values render through [`Render`], which prints nullable values as
//! [`NULL`].

use std::fmt;

/// Marker printed for null keys, null values and absent slots.
pub const NULL: &str = "null";

/// Textual form of a key or value inside a table rendering.
pub trait Render {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: Render> Render for Option<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(v) => v.render(f),
            None => f.write_str(NULL),
        }
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

macro_rules! impl_render_display {
    ($($ty:ty),* $(,)?) => {
        $(impl Render for $ty {
            fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        })*
    };
}

impl_render_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
    String,
);

/// Writes `[a, b, ...]`, rendering each item with `each`.
pub(crate) fn write_list<I, F>(f: &mut fmt::Formatter<'_>, items: I, mut each: F) -> fmt::Result
where
    I: IntoIterator,
    F: FnMut(&mut fmt::Formatter<'_>, I::Item) -> fmt::Result,
{
    f.write_str("[")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        each(f, item)?;
    }
    f.write_str("]")
}
