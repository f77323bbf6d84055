/// DSL macro for building test schemas.
///
/// Produces a `fdnorm_core::Schema`.
///
/// # Syntax
///
/// ```ignore
/// schema! {
///     attributes: A B C D;   // optional, declares attributes up front
///     A B -> C;
///     C -> A D;
/// }
/// ```
#[macro_export]
macro_rules! schema {
    (attributes: $($a:ident)+ ; $($($l:ident)+ -> $($r:ident)+);* $(;)?) => {
        fdnorm_core::Schema::builder()
            .attributes([$(stringify!($a)),+])
            $(.dependency([$(stringify!($l)),+], [$(stringify!($r)),+]))*
            .build()
            .expect("schema! produced an invalid schema")
    };
    ($($($l:ident)+ -> $($r:ident)+);* $(;)?) => {
        fdnorm_core::Schema::builder()
            $(.dependency([$(stringify!($l)),+], [$(stringify!($r)),+]))*
            .build()
            .expect("schema! produced an invalid schema")
    };
}

/// Resolve a whitespace-separated list of attribute names.
#[allow(dead_code)]
pub fn set(
    schema: &fdnorm_core::Schema,
    names: &str,
) -> fdnorm_core::attribute::AttributeSet {
    schema
        .attribute_set(names.split_whitespace())
        .expect("unknown attribute in test")
}

/// Render each item with the schema's attribute names.
#[allow(dead_code)]
pub fn named<T: fdnorm_core::display::Render>(
    schema: &fdnorm_core::Schema,
    items: &[T],
) -> Vec<String> {
    items
        .iter()
        .map(|item| schema.named(item).to_string())
        .collect()
}

/// Every subset of `set`, including the empty set and `set` itself.
#[allow(dead_code)]
pub fn subsets(
    set: fdnorm_core::attribute::AttributeSet,
) -> Vec<fdnorm_core::attribute::AttributeSet> {
    let members: Vec<_> = set.iter().collect();
    (0..1u32 << members.len())
        .map(|mask| {
            members
                .iter()
                .enumerate()
                .filter(|&(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, &attribute)| attribute)
                .collect()
        })
        .collect()
}

/// A handful of schemas covering the shapes the algorithms branch on.
#[allow(dead_code)]
pub fn corpus() -> Vec<fdnorm_core::Schema> {
    vec![
        schema! { A -> B; B -> C; C -> D },
        schema! { A -> B; B -> A },
        schema! { attributes: A B C; A -> B; B -> A },
        schema! { A B -> C; C -> A; B C -> D; A C D -> B; D -> E G; B E -> C; C -> D; C E -> G },
        schema! { Street City -> Zip; Zip -> City },
        schema! { A -> B C; C D -> E; B -> D; E -> A },
        schema! { A -> B; C -> D },
        schema! { attributes: A B C D; },
        schema! { A B -> A; A -> C },
    ]
}
