//! Structural equality with caller-supplied attribute predicates.
//!
//! Two nodes are equal when they are the same variant, their attributes satisfy
//! the predicate and their children are equal pairwise, in order. Literals and
//! names compare with `==`.

use crate::ir::{Field, Pattern, Type, Value, ValueDefinition};
use crate::stack::ensure_sufficient_stack;

pub fn equal_type<A, F>(left: &Type<A>, right: &Type<A>, eq: &F) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    ensure_sufficient_stack(|| equal_type_node(left, right, eq))
}

fn equal_type_node<A, F>(left: &Type<A>, right: &Type<A>, eq: &F) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    let all = |l: &[Type<A>], r: &[Type<A>]| {
        l.len() == r.len() && l.iter().zip(r).all(|(l, r)| equal_type(l, r, eq))
    };
    let fields = |l: &[Field<A>], r: &[Field<A>]| {
        l.len() == r.len()
            && l
                .iter()
                .zip(r)
                .all(|(l, r)| l.name == r.name && equal_type(&l.tpe, &r.tpe, eq))
    };

    match (left, right) {
        (Type::Variable(la, ln), Type::Variable(ra, rn)) => eq(la, ra) && ln == rn,
        (Type::Reference(la, lf, lp), Type::Reference(ra, rf, rp)) => {
            eq(la, ra) && lf == rf && all(lp, rp)
        }
        (Type::Tuple(la, le), Type::Tuple(ra, re)) => eq(la, ra) && all(le, re),
        (Type::Record(la, lf), Type::Record(ra, rf)) => eq(la, ra) && fields(lf, rf),
        (Type::ExtensibleRecord(la, lv, lf), Type::ExtensibleRecord(ra, rv, rf)) => {
            eq(la, ra) && lv == rv && fields(lf, rf)
        }
        (Type::Function(la, larg, lres), Type::Function(ra, rarg, rres)) => {
            eq(la, ra) && equal_type(larg, rarg, eq) && equal_type(lres, rres, eq)
        }
        (Type::Unit(la), Type::Unit(ra)) => eq(la, ra),
        _ => false,
    }
}

pub fn equal_pattern<A, F>(left: &Pattern<A>, right: &Pattern<A>, eq: &F) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    ensure_sufficient_stack(|| equal_pattern_node(left, right, eq))
}

fn equal_pattern_node<A, F>(left: &Pattern<A>, right: &Pattern<A>, eq: &F) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    let all = |l: &[Pattern<A>], r: &[Pattern<A>]| {
        l.len() == r.len() && l.iter().zip(r).all(|(l, r)| equal_pattern(l, r, eq))
    };

    match (left, right) {
        (Pattern::Wildcard(la), Pattern::Wildcard(ra)) => eq(la, ra),
        (Pattern::As(la, ls, ln), Pattern::As(ra, rs, rn)) => {
            eq(la, ra) && ln == rn && equal_pattern(ls, rs, eq)
        }
        (Pattern::Tuple(la, le), Pattern::Tuple(ra, re)) => eq(la, ra) && all(le, re),
        (Pattern::Constructor(la, lf, largs), Pattern::Constructor(ra, rf, rargs)) => {
            eq(la, ra) && lf == rf && all(largs, rargs)
        }
        (Pattern::EmptyList(la), Pattern::EmptyList(ra)) => eq(la, ra),
        (Pattern::HeadTail(la, lh, lt), Pattern::HeadTail(ra, rh, rt)) => {
            eq(la, ra) && equal_pattern(lh, rh, eq) && equal_pattern(lt, rt, eq)
        }
        (Pattern::Literal(la, ll), Pattern::Literal(ra, rl)) => eq(la, ra) && ll == rl,
        (Pattern::Unit(la), Pattern::Unit(ra)) => eq(la, ra),
        _ => false,
    }
}

pub fn equal_value<TA, VA, FT, FV>(
    left: &Value<TA, VA>,
    right: &Value<TA, VA>,
    eq_ta: &FT,
    eq_va: &FV,
) -> bool
where
    FT: Fn(&TA, &TA) -> bool,
    FV: Fn(&VA, &VA) -> bool,
{
    ensure_sufficient_stack(|| equal_value_node(left, right, eq_ta, eq_va))
}

fn equal_value_node<TA, VA, FT, FV>(
    left: &Value<TA, VA>,
    right: &Value<TA, VA>,
    eq_ta: &FT,
    eq_va: &FV,
) -> bool
where
    FT: Fn(&TA, &TA) -> bool,
    FV: Fn(&VA, &VA) -> bool,
{
    let value = |l: &Value<TA, VA>, r: &Value<TA, VA>| equal_value(l, r, eq_ta, eq_va);
    let pattern = |l: &Pattern<VA>, r: &Pattern<VA>| equal_pattern(l, r, eq_va);
    let definition = |l: &ValueDefinition<TA, VA>, r: &ValueDefinition<TA, VA>| {
        equal_value_definition(l, r, eq_ta, eq_va)
    };
    let all = |l: &[Value<TA, VA>], r: &[Value<TA, VA>]| {
        l.len() == r.len() && l.iter().zip(r).all(|(l, r)| value(l, r))
    };
    let pairs = |l: &[(crate::naming::Name, Value<TA, VA>)],
                 r: &[(crate::naming::Name, Value<TA, VA>)]| {
        l.len() == r.len()
            && l
                .iter()
                .zip(r)
                .all(|((ln, lv), (rn, rv))| ln == rn && value(lv, rv))
    };

    if !eq_va(left.attributes(), right.attributes()) {
        return false;
    }
    match (left, right) {
        (Value::Literal(_, l), Value::Literal(_, r)) => l == r,
        (Value::Constructor(_, l), Value::Constructor(_, r)) => l == r,
        (Value::Tuple(_, l), Value::Tuple(_, r)) => all(l, r),
        (Value::List(_, l), Value::List(_, r)) => all(l, r),
        (Value::Record(_, l), Value::Record(_, r)) => pairs(l, r),
        (Value::Variable(_, l), Value::Variable(_, r)) => l == r,
        (Value::Reference(_, l), Value::Reference(_, r)) => l == r,
        (Value::Field(_, ls, ln), Value::Field(_, rs, rn)) => ln == rn && value(ls, rs),
        (Value::FieldFunction(_, l), Value::FieldFunction(_, r)) => l == r,
        (Value::Apply(_, lf, la), Value::Apply(_, rf, ra)) => value(lf, rf) && value(la, ra),
        (Value::Lambda(_, lp, lb), Value::Lambda(_, rp, rb)) => pattern(lp, rp) && value(lb, rb),
        (Value::LetDefinition(_, ln, ld, li), Value::LetDefinition(_, rn, rd, ri)) => {
            ln == rn && definition(ld, rd) && value(li, ri)
        }
        (Value::LetRecursion(_, ld, li), Value::LetRecursion(_, rd, ri)) => {
            ld.len() == rd.len()
                && ld
                    .iter()
                    .zip(rd)
                    .all(|((ln, l), (rn, r))| ln == rn && definition(l, r))
                && value(li, ri)
        }
        (Value::Destructure(_, lp, lv, li), Value::Destructure(_, rp, rv, ri)) => {
            pattern(lp, rp) && value(lv, rv) && value(li, ri)
        }
        (Value::IfThenElse(_, lc, lt, le), Value::IfThenElse(_, rc, rt, re)) => {
            value(lc, rc) && value(lt, rt) && value(le, re)
        }
        (Value::PatternMatch(_, ls, lc), Value::PatternMatch(_, rs, rc)) => {
            value(ls, rs)
                && lc.len() == rc.len()
                && lc
                    .iter()
                    .zip(rc)
                    .all(|((lp, lb), (rp, rb))| pattern(lp, rp) && value(lb, rb))
        }
        (Value::UpdateRecord(_, ls, lf), Value::UpdateRecord(_, rs, rf)) => {
            value(ls, rs) && pairs(lf, rf)
        }
        (Value::Unit(_), Value::Unit(_)) => true,
        _ => false,
    }
}

pub fn equal_value_definition<TA, VA, FT, FV>(
    left: &ValueDefinition<TA, VA>,
    right: &ValueDefinition<TA, VA>,
    eq_ta: &FT,
    eq_va: &FV,
) -> bool
where
    FT: Fn(&TA, &TA) -> bool,
    FV: Fn(&VA, &VA) -> bool,
{
    left.input_types.len() == right.input_types.len()
        && left
            .input_types
            .iter()
            .zip(&right.input_types)
            .all(|((ln, la, lt), (rn, ra, rt))| {
                ln == rn && eq_va(la, ra) && equal_type(lt, rt, eq_ta)
            })
        && equal_type(&left.output_type, &right.output_type, eq_ta)
        && equal_value(&left.body, &right.body, eq_ta, eq_va)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Literal;
    use crate::naming::Name;

    fn same(a: &u32, b: &u32) -> bool {
        a == b
    }

    fn any(_: &u32, _: &u32) -> bool {
        true
    }

    #[test]
    fn test_tuple_pattern_is_order_sensitive() {
        let ab = Pattern::Tuple(0, vec![Pattern::Wildcard(1), Pattern::Unit(2)]);
        let ba = Pattern::Tuple(0, vec![Pattern::Unit(2), Pattern::Wildcard(1)]);
        assert!(equal_pattern(&ab, &ab.clone(), &same));
        assert!(!equal_pattern(&ab, &ba, &same));
        assert!(!equal_pattern(&ab, &ba, &any));
    }

    #[test]
    fn test_attribute_predicate_is_applied() {
        let left = Type::Variable(1u32, Name::from_str("a"));
        let right = Type::Variable(2u32, Name::from_str("a"));
        assert!(!equal_type(&left, &right, &same));
        assert!(equal_type(&left, &right, &any));
    }

    #[test]
    fn test_different_variants_are_unequal() {
        let unit: Value<u32, u32> = Value::Unit(0);
        let list: Value<u32, u32> = Value::List(0, vec![]);
        assert!(!equal_value(&unit, &list, &any, &any));
    }

    #[test]
    fn test_value_children_are_compared() {
        let lit = |n| Value::<u32, u32>::Literal(0, Literal::WholeNumber(n));
        let left = Value::if_then_else(0, lit(1), lit(2), lit(3));
        let right = Value::if_then_else(0, lit(1), lit(2), lit(4));
        assert!(equal_value(&left, &left, &same, &same));
        assert!(!equal_value(&left, &right, &same, &same));
    }

    #[test]
    fn test_definition_output_type_attributes_are_compared() {
        let def = |output: u32| {
            ValueDefinition::<u32, u32>::new(vec![], Type::Unit(output), Value::Unit(0))
        };
        assert!(equal_value_definition(&def(1), &def(1), &same, &same));
        assert!(!equal_value_definition(&def(1), &def(2), &same, &same));
    }
}
