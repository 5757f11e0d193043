use bumpalo::Bump;
use hoist::ast::{Ast, AstBuilder, NodeId};

/// Build a module whose body is the statements returned by `build`.
pub fn module<'a>(
    arena: &'a Bump,
    build: impl FnOnce(&mut AstBuilder<'a>) -> Vec<NodeId>,
) -> Ast<'a> {
    let mut b = AstBuilder::new(arena);
    let body = build(&mut b);
    b.finish(&body)
}

/// Run the full pipeline on a module and check what was hoisted and the
/// rewritten source.
#[allow(unused_macros)]
macro_rules! hoist_case {
    (
        $name:ident,
        build: $build:expr,
        hoisted: $hoisted:expr,
        output: $output:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let arena = bumpalo::Bump::new();
            let mut ast = crate::cases::module(&arena, $build);
            let prepared = hoist::prepare(&mut ast, &hoist::HoistOptions::default()).unwrap();
            let hoisted: Vec<String> = prepared
                .hoisted
                .iter()
                .map(|record| ast.unparse_node(record.node))
                .collect();
            let expected: &[&str] = &$hoisted;
            pretty_assertions::assert_eq!(hoisted, expected);
            pretty_assertions::assert_eq!(ast.unparse(), $output);
        }
    };
}
