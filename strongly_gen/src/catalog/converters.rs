//! Converter fragments: serialization adapters for each backing.

use super::Fragment;
use super::backing::{Shape, fill, shape};
use crate::kinds::{BackingKind, ConverterKind};

const NEWTONSOFT_ATTRIBUTE: &str =
    "[Newtonsoft.Json.JsonConverter(typeof({{TYPE}}NewtonsoftJsonConverter))]";

const NEWTONSOFT: &str = r"class {{TYPE}}NewtonsoftJsonConverter : Newtonsoft.Json.JsonConverter
{
    public override bool CanConvert(System.Type objectType) => objectType == typeof({{TYPE}});

    public override void WriteJson(Newtonsoft.Json.JsonWriter writer, object? value, Newtonsoft.Json.JsonSerializer serializer)
    {
        var id = ({{TYPE}})value!;
        serializer.Serialize(writer, id.Value);
    }

    public override object? ReadJson(Newtonsoft.Json.JsonReader reader, System.Type objectType, object? existingValue, Newtonsoft.Json.JsonSerializer serializer)
    {
{{NEWTONSOFT_READ}}
    }
}
";

const NEWTONSOFT_READ_STRUCT: &str = r"        var result = serializer.Deserialize<{{PRIMITIVE}}?>(reader);
        return result.HasValue ? new {{TYPE}}(result.Value) : null;";

const NEWTONSOFT_READ_TEXT: &str = r"        var result = serializer.Deserialize<string>(reader);
        return result is null ? null : new {{TYPE}}(result);";

const NEWTONSOFT_READ_OPTIONAL_TEXT: &str =
    "        return new {{TYPE}}(serializer.Deserialize<string?>(reader));";

const SYSTEM_TEXT_JSON_ATTRIBUTE: &str =
    "[System.Text.Json.Serialization.JsonConverter(typeof({{TYPE}}SystemTextJsonConverter))]";

const SYSTEM_TEXT_JSON: &str = r"class {{TYPE}}SystemTextJsonConverter : System.Text.Json.Serialization.JsonConverter<{{TYPE}}>
{
{{HANDLE_NULL}}    public override {{TYPE}} Read(ref System.Text.Json.Utf8JsonReader reader, System.Type typeToConvert, System.Text.Json.JsonSerializerOptions options)
    {
        return new {{TYPE}}({{STJ_READ}});
    }

    public override void Write(System.Text.Json.Utf8JsonWriter writer, {{TYPE}} value, System.Text.Json.JsonSerializerOptions options)
    {
{{STJ_WRITE}}
    }
}
";

const HANDLE_NULL: &str = "    public override bool HandleNull => true;\n\n";

const TYPE_CONVERTER_ATTRIBUTE: &str =
    "[System.ComponentModel.TypeConverter(typeof({{TYPE}}TypeConverter))]";

const TYPE_CONVERTER_STRUCT: &str = r"class {{TYPE}}TypeConverter : System.ComponentModel.TypeConverter
{
    public override bool CanConvertFrom(System.ComponentModel.ITypeDescriptorContext? context, System.Type sourceType)
    {
        return sourceType == typeof({{PRIMITIVE}}) || sourceType == typeof(string) || base.CanConvertFrom(context, sourceType);
    }

    public override object? ConvertFrom(System.ComponentModel.ITypeDescriptorContext? context, System.Globalization.CultureInfo? culture, object value)
    {
        return value switch
        {
            {{PRIMITIVE}} primitive => new {{TYPE}}(primitive),
            string text when !string.IsNullOrEmpty(text) && {{PRIMITIVE}}.TryParse(text, culture, out {{PRIMITIVE}} parsed) => new {{TYPE}}(parsed),
            _ => base.ConvertFrom(context, culture, value),
        };
    }

    public override bool CanConvertTo(System.ComponentModel.ITypeDescriptorContext? context, System.Type? destinationType)
    {
        return destinationType == typeof({{PRIMITIVE}}) || destinationType == typeof(string) || base.CanConvertTo(context, destinationType);
    }

    public override object? ConvertTo(System.ComponentModel.ITypeDescriptorContext? context, System.Globalization.CultureInfo? culture, object? value, System.Type destinationType)
    {
        if (value is {{TYPE}} id)
        {
            if (destinationType == typeof({{PRIMITIVE}}))
            {
                return id.Value;
            }

            if (destinationType == typeof(string))
            {
                return id.Value.ToString();
            }
        }

        return base.ConvertTo(context, culture, value, destinationType);
    }
}
";

const TYPE_CONVERTER_TEXT: &str = r"class {{TYPE}}TypeConverter : System.ComponentModel.TypeConverter
{
    public override bool CanConvertFrom(System.ComponentModel.ITypeDescriptorContext? context, System.Type sourceType)
    {
        return sourceType == typeof(string) || base.CanConvertFrom(context, sourceType);
    }

    public override object? ConvertFrom(System.ComponentModel.ITypeDescriptorContext? context, System.Globalization.CultureInfo? culture, object value)
    {
        return value switch
        {
            string text => new {{TYPE}}(text),
            _ => base.ConvertFrom(context, culture, value),
        };
    }

    public override bool CanConvertTo(System.ComponentModel.ITypeDescriptorContext? context, System.Type? destinationType)
    {
        return destinationType == typeof(string) || base.CanConvertTo(context, destinationType);
    }

    public override object? ConvertTo(System.ComponentModel.ITypeDescriptorContext? context, System.Globalization.CultureInfo? culture, object? value, System.Type destinationType)
    {
        if (value is {{TYPE}} id && destinationType == typeof(string))
        {
            return id.Value;
        }

        return base.ConvertTo(context, culture, value, destinationType);
    }
}
";

const EF_CORE: &str = r"    public class EfCoreValueConverter : Microsoft.EntityFrameworkCore.Storage.ValueConversion.ValueConverter<{{TYPE}}, {{PRIMITIVE}}>
    {
        public EfCoreValueConverter()
            : this(null)
        {
        }

        public EfCoreValueConverter(Microsoft.EntityFrameworkCore.Storage.ValueConversion.ConverterMappingHints? mappingHints)
            : base(id => id.Value, value => new {{TYPE}}(value), mappingHints)
        {
        }
    }
";

const DAPPER: &str = r#"class {{TYPE}}DapperTypeHandler : Dapper.SqlMapper.TypeHandler<{{TYPE}}>
{
    public override void SetValue(System.Data.IDbDataParameter parameter, {{TYPE}} value)
    {
{{DAPPER_SET}}
    }

    public override {{TYPE}} Parse(object value)
    {
        return value switch
        {
{{DAPPER_ARMS}}
            _ => throw new System.InvalidCastException($"Unable to cast object of type {value.GetType()} to {{TYPE}}"),
        };
    }
}
"#;

const DAPPER_SET: &str = "        parameter.Value = value.Value;";

const DAPPER_SET_OPTIONAL: &str =
    "        parameter.Value = (object?)value.Value ?? System.DBNull.Value;";

const DAPPER_ARMS_STRUCT: &str = r"            {{PRIMITIVE}} primitive => new {{TYPE}}(primitive),
            string text when {{PRIMITIVE}}.TryParse(text, System.Globalization.CultureInfo.InvariantCulture, out {{PRIMITIVE}} parsed) => new {{TYPE}}(parsed),";

const DAPPER_ARMS_TEXT: &str = "            string text => new {{TYPE}}(text),";

const DAPPER_ARMS_OPTIONAL_TEXT: &str = r"            System.DBNull => new {{TYPE}}(null),
            string text => new {{TYPE}}(text),";

/// Authored fragment for `kind` on `backing`, if the pair is meaningful.
pub(super) fn fragment(backing: BackingKind, kind: ConverterKind) -> Option<Fragment> {
    let form = shape(backing);
    let fragment = match kind {
        ConverterKind::NewtonsoftJson => {
            let read = match form {
                Shape::Struct => NEWTONSOFT_READ_STRUCT,
                Shape::Text => NEWTONSOFT_READ_TEXT,
                Shape::OptionalText => NEWTONSOFT_READ_OPTIONAL_TEXT,
            };
            Fragment::new()
                .with_attribute(NEWTONSOFT_ATTRIBUTE)
                .with_sibling(fill(&NEWTONSOFT.replace("{{NEWTONSOFT_READ}}", read), backing))
        }
        ConverterKind::SystemTextJson => {
            let handle_null = if form == Shape::OptionalText { HANDLE_NULL } else { "" };
            Fragment::new()
                .with_attribute(SYSTEM_TEXT_JSON_ATTRIBUTE)
                .with_sibling(fill(
                    &SYSTEM_TEXT_JSON.replace("{{HANDLE_NULL}}", handle_null),
                    backing,
                ))
        }
        ConverterKind::TypeConverter => {
            let template = match form {
                Shape::Struct => TYPE_CONVERTER_STRUCT,
                Shape::Text | Shape::OptionalText => TYPE_CONVERTER_TEXT,
            };
            Fragment::new()
                .with_attribute(TYPE_CONVERTER_ATTRIBUTE)
                .with_sibling(fill(template, backing))
        }
        ConverterKind::EfCoreValueConverter => Fragment::new().with_members(fill(EF_CORE, backing)),
        ConverterKind::DapperTypeHandler => {
            let (set, arms) = match form {
                Shape::Struct => (DAPPER_SET, DAPPER_ARMS_STRUCT),
                Shape::Text => (DAPPER_SET, DAPPER_ARMS_TEXT),
                Shape::OptionalText => (DAPPER_SET_OPTIONAL, DAPPER_ARMS_OPTIONAL_TEXT),
            };
            let template = DAPPER
                .replace("{{DAPPER_SET}}", set)
                .replace("{{DAPPER_ARMS}}", arms);
            Fragment::new().with_sibling(fill(&template, backing))
        }
    };
    Some(fragment)
}
