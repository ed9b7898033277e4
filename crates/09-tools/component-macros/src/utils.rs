//! 宏工具函数

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::{Attribute, Field, Ident, LitStr, Type};

/// 字段名（去掉原始标识符前缀 `r#`）
pub fn field_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

/// 生成注册函数名
pub fn registration_fn_name(struct_name: &Ident) -> Ident {
    Ident::new(
        &format!("__register_bean_{}", to_snake_case(&struct_name.unraw().to_string())),
        Span::call_site(),
    )
}

/// 查找指定名称的属性
pub fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

/// 检查字段是否有特定属性
pub fn field_has_attribute(field: &Field, attr_name: &str) -> bool {
    find_attribute(&field.attrs, attr_name).is_some()
}

/// 解析 `#[name]`、`#[name("id")]`、`#[name(value = "id", ...)]` 三种写法
///
/// 返回位置参数或 `value` 的值，其余键值交给 `extra` 处理
pub fn parse_value_attribute<F>(attr: &Attribute, mut extra: F) -> syn::Result<Option<String>>
where
    F: FnMut(&Ident, LitStr) -> syn::Result<()>,
{
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(None);
    }

    if let Ok(lit) = attr.parse_args::<LitStr>() {
        return Ok(Some(lit.value()));
    }

    let mut value = None;
    attr.parse_nested_meta(|meta| {
        let Some(key) = meta.path.get_ident().cloned() else {
            return Err(meta.error("不支持的参数"));
        };
        let lit: LitStr = meta.value()?.parse()?;
        if key == "value" {
            value = Some(lit.value());
            Ok(())
        } else {
            extra(&key, lit)
        }
    })?;
    Ok(value)
}

/// 检查类型是否为 Autowired<T>
pub fn is_autowired_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Autowired"),
        _ => false,
    }
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            // 检查前一个字符是否为小写，或者下一个字符是否为小写
            let prev_is_lower = chars.get(i - 1).is_some_and(|c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.extend(ch.to_lowercase());
    }

    result
}
