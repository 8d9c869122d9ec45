//! Base fragments: one struct body per backing.

use super::Fragment;
use super::backing::fill;
use crate::kinds::BackingKind;

const HEADER: &str = "readonly partial struct {{TYPE}}{{INTERFACES}}";

const NUMERIC: &str = r#"    public {{PRIMITIVE}} Value { get; }

    public {{TYPE}}({{PRIMITIVE}} value)
    {
        Validate(value);
        Value = value;
    }

    public {{TYPE}}()
    {
        {{PRIMITIVE}} value = {{ZERO}};
        Validate(value);
        Value = value;
    }

    public static readonly {{TYPE}} Empty = new {{TYPE}}({{ZERO}});

    public override string ToString() => Value.ToString(System.Globalization.CultureInfo.InvariantCulture);

    public static {{TYPE}} Parse(string value) => new {{TYPE}}({{PRIMITIVE}}.Parse(value, System.Globalization.CultureInfo.InvariantCulture));

    public static bool TryParse(string? value, out {{TYPE}} result)
    {
        if ({{PRIMITIVE}}.TryParse(value, System.Globalization.CultureInfo.InvariantCulture, out {{PRIMITIVE}} parsed))
        {
            result = new {{TYPE}}(parsed);
            return true;
        }

        result = default;
        return false;
    }

    private static void Validate({{PRIMITIVE}} value)
    {
{{VALIDATE}}    }
"#;

const GUID: &str = r#"    public System.Guid Value { get; }

    public {{TYPE}}(System.Guid value)
    {
        Validate(value);
        Value = value;
    }

    public {{TYPE}}()
    {
        System.Guid value = System.Guid.Empty;
        Validate(value);
        Value = value;
    }

    public static {{TYPE}} New() => new {{TYPE}}(System.Guid.NewGuid());

    public static readonly {{TYPE}} Empty = new {{TYPE}}(System.Guid.Empty);

    public override string ToString() => Value.ToString();

    public static {{TYPE}} Parse(string value) => new {{TYPE}}(System.Guid.Parse(value));

    public static bool TryParse(string? value, out {{TYPE}} result)
    {
        if (System.Guid.TryParse(value, out System.Guid parsed))
        {
            result = new {{TYPE}}(parsed);
            return true;
        }

        result = default;
        return false;
    }

    private static void Validate(System.Guid value)
    {
{{VALIDATE}}    }
"#;

const MASKED_GUID: &str = r#"    public System.Guid Value { get; }

    public {{TYPE}}(System.Guid value)
    {
        Validate(value);
        Value = value;
    }

    public {{TYPE}}()
    {
        System.Guid value = System.Guid.Empty;
        Validate(value);
        Value = value;
    }

    public static {{TYPE}} New() => new {{TYPE}}(System.Guid.NewGuid());

    public static readonly {{TYPE}} Empty = new {{TYPE}}(System.Guid.Empty);

    public override string ToString() => "****" + Value.ToString("N").Substring(28);

    public string Reveal() => Value.ToString();

    public static {{TYPE}} Parse(string value) => new {{TYPE}}(System.Guid.Parse(value));

    public static bool TryParse(string? value, out {{TYPE}} result)
    {
        if (System.Guid.TryParse(value, out System.Guid parsed))
        {
            result = new {{TYPE}}(parsed);
            return true;
        }

        result = default;
        return false;
    }

    private static void Validate(System.Guid value)
    {
{{VALIDATE}}    }
"#;

const TEXT: &str = r#"    public string Value { get; }

    public {{TYPE}}(string value)
    {
        Validate(value);
        Value = value ?? string.Empty;
    }

    public {{TYPE}}()
    {
        string value = string.Empty;
        Validate(value);
        Value = value;
    }

    public static readonly {{TYPE}} Empty = new {{TYPE}}(string.Empty);

    public override string ToString() => Value;

    public static {{TYPE}} Parse(string value) => new {{TYPE}}(value);

    public static bool TryParse(string? value, out {{TYPE}} result)
    {
        if (value is null)
        {
            result = default;
            return false;
        }

        result = new {{TYPE}}(value);
        return true;
    }

    private static void Validate(string value)
    {
{{VALIDATE}}    }
"#;

// TryParse trims before the constructor runs, so validation sees the
// trimmed value. Parse keeps the input untouched.
const OPTIONAL_TEXT: &str = r#"    public string? Value { get; }

    public {{TYPE}}(string? value)
    {
        Validate(value);
        Value = value;
    }

    public {{TYPE}}()
    {
        string? value = null;
        Validate(value);
        Value = value;
    }

    public static readonly {{TYPE}} Empty = new {{TYPE}}(string.Empty);

    public bool HasValue => Value is not null;

    public override string? ToString() => Value;

    public static {{TYPE}} Parse(string? value) => new {{TYPE}}(value);

    public static bool TryParse(string? value, out {{TYPE}} result)
    {
        result = new {{TYPE}}(value?.Trim());
        return true;
    }

    private static void Validate(string? value)
    {
{{VALIDATE}}    }
"#;

pub(super) fn fragment(backing: BackingKind) -> Fragment {
    let members = match backing {
        BackingKind::Int | BackingKind::Long | BackingKind::Decimal => NUMERIC,
        BackingKind::Guid => GUID,
        BackingKind::MaskedGuid => MASKED_GUID,
        BackingKind::String => TEXT,
        BackingKind::NullableString => OPTIONAL_TEXT,
    };
    Fragment::new()
        .with_header(HEADER)
        .with_members(fill(members, backing))
}
