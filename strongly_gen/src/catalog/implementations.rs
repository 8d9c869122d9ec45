//! Implementation fragments: behavioural members added to the struct body.

use super::Fragment;
use super::backing::{Shape, fill, shape};
use crate::kinds::{BackingKind, ImplementationKind};

const EQUATABLE_STRUCT: &str = r"    public bool Equals({{TYPE}} other) => Value.Equals(other.Value);

    public override bool Equals(object? obj) => obj is {{TYPE}} other && Equals(other);

    public override int GetHashCode() => Value.GetHashCode();

    public static bool operator ==({{TYPE}} a, {{TYPE}} b) => a.Equals(b);

    public static bool operator !=({{TYPE}} a, {{TYPE}} b) => !(a == b);
";

const EQUATABLE_TEXT: &str = r"    public bool Equals({{TYPE}} other) => string.Equals(Value, other.Value, System.StringComparison.Ordinal);

    public override bool Equals(object? obj) => obj is {{TYPE}} other && Equals(other);

    public override int GetHashCode() => Value is null ? 0 : System.StringComparer.Ordinal.GetHashCode(Value);

    public static bool operator ==({{TYPE}} a, {{TYPE}} b) => a.Equals(b);

    public static bool operator !=({{TYPE}} a, {{TYPE}} b) => !(a == b);
";

const EQUATABLE_OPTIONAL_TEXT: &str = r"    public bool Equals({{TYPE}} other) => (Value, other.Value) switch
    {
        (null, null) => true,
        (null, _) or (_, null) => false,
        (_, _) => string.Equals(Value, other.Value, System.StringComparison.Ordinal),
    };

    public override bool Equals(object? obj) => obj is {{TYPE}} other && Equals(other);

    public override int GetHashCode() => Value is null ? 0 : System.StringComparer.Ordinal.GetHashCode(Value);

    public static bool operator ==({{TYPE}} a, {{TYPE}} b) => a.Equals(b);

    public static bool operator !=({{TYPE}} a, {{TYPE}} b) => !(a == b);
";

const COMPARABLE_STRUCT: &str =
    "    public int CompareTo({{TYPE}} other) => Value.CompareTo(other.Value);\n";

const COMPARABLE_TEXT: &str =
    "    public int CompareTo({{TYPE}} other) => string.CompareOrdinal(Value, other.Value);\n";

const COMPARABLE_OPTIONAL_TEXT: &str = r"    public int CompareTo({{TYPE}} other) => (Value, other.Value) switch
    {
        (null, null) => 0,
        (null, _) => -1,
        (_, null) => 1,
        (_, _) => string.CompareOrdinal(Value, other.Value),
    };
";

const PARSABLE_STRUCT: &str = r"    public static {{TYPE}} Parse(string s, System.IFormatProvider? provider) => new {{TYPE}}({{PRIMITIVE}}.Parse(s, provider));

    public static bool TryParse([System.Diagnostics.CodeAnalysis.NotNullWhen(true)] string? s, System.IFormatProvider? provider, out {{TYPE}} result)
    {
        if ({{PRIMITIVE}}.TryParse(s, provider, out {{PRIMITIVE}} parsed))
        {
            result = new {{TYPE}}(parsed);
            return true;
        }

        result = default;
        return false;
    }
";

const PARSABLE_TEXT: &str = r"    public static {{TYPE}} Parse(string s, System.IFormatProvider? provider) => new {{TYPE}}(s);

    public static bool TryParse([System.Diagnostics.CodeAnalysis.NotNullWhen(true)] string? s, System.IFormatProvider? provider, out {{TYPE}} result)
    {
        if (s is null)
        {
            result = default;
            return false;
        }

        result = new {{TYPE}}(s);
        return true;
    }
";

const PARSABLE_OPTIONAL_TEXT: &str = r"    public static {{TYPE}} Parse(string s, System.IFormatProvider? provider) => new {{TYPE}}(s);

    public static bool TryParse(string? s, System.IFormatProvider? provider, out {{TYPE}} result)
    {
        result = new {{TYPE}}(s?.Trim());
        return true;
    }
";

const FORMATTABLE: &str = "    public string ToString(string? format, System.IFormatProvider? formatProvider) => Value.ToString(format, formatProvider);\n";

const COMPARISON_OPERATORS: &str = r"    public static bool operator <({{TYPE}} a, {{TYPE}} b) => a.Value < b.Value;

    public static bool operator <=({{TYPE}} a, {{TYPE}} b) => a.Value <= b.Value;

    public static bool operator >({{TYPE}} a, {{TYPE}} b) => a.Value > b.Value;

    public static bool operator >=({{TYPE}} a, {{TYPE}} b) => a.Value >= b.Value;
";

const VALIDATE_NON_NEGATIVE: &str = r#"        if (value < 0)
        {
            throw new System.ArgumentOutOfRangeException(nameof(value), value, "{{TYPE}} must not be negative.");
        }
"#;

const VALIDATE_NOT_NULL: &str = r"        if (value is null)
        {
            throw new System.ArgumentNullException(nameof(value));
        }
";

/// Authored fragment for `kind` on `backing`, if the pair is meaningful.
pub(super) fn fragment(backing: BackingKind, kind: ImplementationKind) -> Option<Fragment> {
    let numeric = matches!(
        backing,
        BackingKind::Int | BackingKind::Long | BackingKind::Decimal
    );
    let members = match (kind, shape(backing)) {
        (ImplementationKind::Equatable, Shape::Struct) => EQUATABLE_STRUCT,
        (ImplementationKind::Equatable, Shape::Text) => EQUATABLE_TEXT,
        (ImplementationKind::Equatable, Shape::OptionalText) => EQUATABLE_OPTIONAL_TEXT,
        // A masked identifier is opaque: it has no order to expose.
        (ImplementationKind::Comparable, Shape::Struct) if backing == BackingKind::MaskedGuid => {
            return None;
        }
        (ImplementationKind::Comparable, Shape::Struct) => COMPARABLE_STRUCT,
        (ImplementationKind::Comparable, Shape::Text) => COMPARABLE_TEXT,
        (ImplementationKind::Comparable, Shape::OptionalText) => COMPARABLE_OPTIONAL_TEXT,
        (ImplementationKind::Parsable, Shape::Struct) => PARSABLE_STRUCT,
        (ImplementationKind::Parsable, Shape::Text) => PARSABLE_TEXT,
        (ImplementationKind::Parsable, Shape::OptionalText) => PARSABLE_OPTIONAL_TEXT,
        (ImplementationKind::Formattable, Shape::Struct) if backing != BackingKind::MaskedGuid => {
            FORMATTABLE
        }
        (ImplementationKind::ComparisonOperators, _) if numeric => COMPARISON_OPERATORS,
        (ImplementationKind::Validation, _) if numeric => {
            return Some(Fragment::new().with_hook(VALIDATE_NON_NEGATIVE));
        }
        (ImplementationKind::Validation, Shape::Text) => {
            return Some(Fragment::new().with_hook(VALIDATE_NOT_NULL));
        }
        _ => return None,
    };
    Some(Fragment::new().with_members(fill(members, backing)))
}
