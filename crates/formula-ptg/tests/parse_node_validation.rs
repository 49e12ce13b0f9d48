use formula_ptg::{
    to_token_array, BinaryOp, CellRef, InvalidTree, ParseNode, Ptg, TokenClass, UnresolvedJump,
    FUNCTION_ID_IF, MAX_COL, MAX_FUNC_ARGS,
};
use pretty_assertions::assert_eq;

fn int(n: u16) -> ParseNode {
    ParseNode::leaf(Ptg::Int(n)).expect("leaf")
}

fn if_var(argc: u8) -> Ptg {
    Ptg::FuncVar {
        id: FUNCTION_ID_IF,
        argc,
        class: TokenClass::Value,
    }
}

#[test]
fn if_with_one_argument_is_rejected() {
    let err = ParseNode::new(if_var(1), vec![int(1)]).expect_err("expected ConditionalArity");
    assert_eq!(err, InvalidTree::ConditionalArity { children: 1 });
    assert_eq!(err.to_string(), "IF takes 2 or 3 arguments, got 1");
}

#[test]
fn if_with_four_arguments_is_rejected() {
    let err = ParseNode::new(if_var(4), vec![int(1), int(2), int(3), int(4)])
        .expect_err("expected ConditionalArity");
    assert_eq!(err, InvalidTree::ConditionalArity { children: 4 });
}

#[test]
fn if_without_children_is_rejected() {
    let err = ParseNode::leaf(if_var(0)).expect_err("expected ConditionalArity");
    assert_eq!(err, InvalidTree::ConditionalArity { children: 0 });
}

#[test]
fn missing_child_is_reported_with_its_position() {
    let err = ParseNode::from_slots(if_var(3), vec![Some(int(1)), None, Some(int(3))])
        .expect_err("expected MissingChild");
    assert_eq!(
        err,
        InvalidTree::MissingChild {
            index: 1,
            ptg: "PtgFuncVar"
        }
    );
}

#[test]
fn from_slots_with_every_child_present_builds_the_node() {
    let node = ParseNode::from_slots(if_var(2), vec![Some(int(1)), Some(int(2))]).expect("node");
    assert!(node.is_conditional());
    assert_eq!(node.children().len(), 2);
    assert_eq!(node.token_count(), 5);
}

#[test]
fn func_var_argument_count_must_match_children() {
    let err = ParseNode::new(if_var(3), vec![int(1), int(2)]).expect_err("expected mismatch");
    assert_eq!(
        err,
        InvalidTree::ArgCountMismatch {
            ptg: "PtgFuncVar",
            declared: 3,
            children: 2
        }
    );
}

#[test]
fn operators_need_their_operands() {
    let err = ParseNode::new(Ptg::Binary(BinaryOp::Add), vec![int(1)])
        .expect_err("expected mismatch");
    assert_eq!(
        err,
        InvalidTree::ArgCountMismatch {
            ptg: "PtgBinary",
            declared: 2,
            children: 1
        }
    );

    let err = ParseNode::unary(Ptg::Int(1), int(2)).expect_err("operands take no children");
    assert_eq!(
        err,
        InvalidTree::ArgCountMismatch {
            ptg: "PtgInt",
            declared: 0,
            children: 1
        }
    );
}

#[test]
fn fixed_arity_functions_are_checked_against_the_registry() {
    let abs = Ptg::function("ABS", 1).expect("ABS");
    let err = ParseNode::new(abs.clone(), vec![int(1), int(2)]).expect_err("expected mismatch");
    assert_eq!(
        err,
        InvalidTree::ArgCountMismatch {
            ptg: "PtgFunc",
            declared: 1,
            children: 2
        }
    );
    assert!(ParseNode::new(abs, vec![int(1)]).is_ok());

    // Unregistered ids cannot be checked and are accepted as-is.
    let unknown = Ptg::Func {
        id: 0x0123,
        class: TokenClass::Value,
    };
    assert!(ParseNode::new(unknown, vec![int(1), int(2), int(3)]).is_ok());
}

#[test]
fn accessors_expose_the_tree() {
    let lhs = int(1);
    let rhs = int(2);
    let node = ParseNode::binary(Ptg::Binary(BinaryOp::Sub), lhs.clone(), rhs.clone())
        .expect("node");
    assert_eq!(node.token(), &Ptg::Binary(BinaryOp::Sub));
    assert_eq!(node.children(), &[lhs, rhs]);
    assert!(!node.is_conditional());
}

#[test]
fn jump_markup_cannot_be_placed_by_hand() {
    let skip = UnresolvedJump::skip().resolve(3).expect("resolve");
    let err = ParseNode::new(Ptg::Attr(skip), vec![int(1)]).expect_err("expected rejection");
    assert_eq!(
        err,
        InvalidTree::CompilerOnlyToken {
            ptg: "PtgAttrSkip"
        }
    );

    let branch = UnresolvedJump::branch_if_false().resolve(7).expect("resolve");
    let err = ParseNode::leaf(Ptg::Attr(branch)).expect_err("expected rejection");
    assert_eq!(
        err.to_string(),
        "PtgAttrIf is produced by the compiler and cannot appear in a parse tree"
    );
}

#[test]
fn func_var_argument_count_is_capped() {
    let sum = |argc: u8| Ptg::FuncVar {
        id: 0x0004,
        argc,
        class: TokenClass::Value,
    };

    let args: Vec<ParseNode> = (0..200).map(int).collect();
    let err = ParseNode::new(sum(200), args).expect_err("expected rejection");
    assert_eq!(
        err,
        InvalidTree::TooManyArguments {
            ptg: "PtgFuncVar",
            argc: 200
        }
    );

    let args: Vec<ParseNode> = (0..u16::from(MAX_FUNC_ARGS)).map(int).collect();
    let node = ParseNode::new(sum(MAX_FUNC_ARGS), args).expect("30 arguments fit");
    assert_eq!(to_token_array(&node).expect("compile").len(), 31);
}

#[test]
fn func_var_id_must_leave_the_high_bit_clear() {
    let token = Ptg::FuncVar {
        id: 0x8001,
        argc: 1,
        class: TokenClass::Value,
    };
    let err = ParseNode::new(token, vec![int(1)]).expect_err("expected rejection");
    assert_eq!(err, InvalidTree::FunctionIdOutOfRange { id: 0x8001 });
}

#[test]
fn columns_past_iv_are_rejected() {
    let err = ParseNode::leaf(Ptg::cell(CellRef::absolute(0, 0x4001))).expect_err("too wide");
    assert_eq!(err, InvalidTree::ColumnOutOfRange { col: 0x4001 });

    let area = Ptg::area(CellRef::relative(0, 0), CellRef::relative(3, MAX_COL + 1));
    assert_eq!(
        ParseNode::leaf(area).expect_err("too wide"),
        InvalidTree::ColumnOutOfRange { col: 256 }
    );
}
