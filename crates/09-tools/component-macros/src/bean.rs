//! `#[derive(Bean)]` 实现

use crate::utils::{
    field_has_attribute, field_name, find_attribute, is_autowired_type, parse_value_attribute,
    registration_fn_name,
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, Result};

/// 结构体上的 bean 参数
#[derive(Default)]
pub struct BeanArgs {
    /// `#[bean(implements(...))]` 声明的能力集
    pub capabilities: Vec<Path>,
    /// `#[bean(alias = "...")]`
    pub aliases: Vec<String>,
    /// `#[bean(init = "path")]`
    pub init: Option<Path>,
    /// `#[service]` 标记：(显式 id, 附加元数据)
    pub service: Option<(Option<String>, Option<String>)>,
    /// `#[transactional]`
    pub transactional: bool,
}

/// 需要注入的字段
#[derive(Debug)]
pub struct BeanField {
    pub ident: Ident,
    pub name: String,
    /// `#[autowired]` 标记及其显式目标 id
    pub autowired: Option<Option<String>>,
    /// `#[property]`
    pub property: bool,
}

impl BeanArgs {
    /// 从结构体属性解析
    pub fn from_attributes(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("bean")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("implements") {
                    meta.parse_nested_meta(|capability| {
                        args.capabilities.push(capability.path);
                        Ok(())
                    })
                } else if meta.path.is_ident("alias") {
                    let lit: LitStr = meta.value()?.parse()?;
                    args.aliases.push(lit.value());
                    Ok(())
                } else if meta.path.is_ident("init") {
                    let lit: LitStr = meta.value()?.parse()?;
                    args.init = Some(lit.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("不支持的 bean 参数，可用: implements, alias, init"))
                }
            })?;
        }

        if let Some(attr) = find_attribute(&input.attrs, "service") {
            let mut meta_data = None;
            let id = parse_value_attribute(attr, |key, lit| {
                if key == "meta_data" {
                    meta_data = Some(lit.value());
                    Ok(())
                } else {
                    Err(syn::Error::new(key.span(), "不支持的 service 参数，可用: value, meta_data"))
                }
            })?;
            args.service = Some((id, meta_data));
        }

        args.transactional = find_attribute(&input.attrs, "transactional").is_some();
        if args.transactional && args.capabilities.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[transactional] 需要通过 #[bean(implements(...))] 声明至少一个能力集",
            ));
        }

        Ok(args)
    }
}

/// 解析带注入标记的字段
fn bean_fields(input: &DeriveInput) -> Result<Vec<BeanField>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "#[derive(Bean)] 只支持结构体"));
    };

    let named = match &data.fields {
        Fields::Named(named) => named,
        Fields::Unit => return Ok(Vec::new()),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Bean)] 不支持元组结构体",
            ))
        }
    };

    let mut fields = Vec::new();
    for field in &named.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let autowired = match find_attribute(&field.attrs, "autowired") {
            Some(attr) => Some(parse_value_attribute(attr, |key, _| {
                Err(syn::Error::new(key.span(), "不支持的 autowired 参数，可用: value"))
            })?),
            None => None,
        };
        let property = field_has_attribute(field, "property");
        if autowired.is_none() && !property {
            continue;
        }
        if !is_autowired_type(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "#[autowired] / #[property] 字段的类型必须是 Autowired<T>",
            ));
        }

        fields.push(BeanField {
            name: field_name(&ident),
            ident,
            autowired,
            property,
        });
    }
    Ok(fields)
}

/// 生成 Bean 实现与类型登记代码
pub fn expand_bean(input: &DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Bean)] 不支持泛型结构体",
        ));
    }

    let args = BeanArgs::from_attributes(input)?;
    let fields = bean_fields(input)?;
    let struct_name = &input.ident;
    let capabilities = &args.capabilities;
    let transactional = args.transactional;

    let upcast_transactional = if transactional {
        quote! {
            fn upcast_transactional(
                self: ::std::sync::Arc<Self>,
                capability: ::std::any::TypeId,
                transactions: &::infrastructure_common::TransactionManager,
            ) -> ::std::option::Option<::std::boxed::Box<dyn ::std::any::Any>> {
                #(
                    if capability == ::std::any::TypeId::of::<dyn #capabilities>() {
                        let inner: ::std::sync::Arc<dyn #capabilities> = self;
                        let proxy: ::std::sync::Arc<dyn #capabilities> = ::std::sync::Arc::new(
                            ::infrastructure_common::TransactionalProxy::<dyn #capabilities>::new(
                                inner,
                                ::std::clone::Clone::clone(transactions),
                            ),
                        );
                        return ::std::option::Option::Some(::std::boxed::Box::new(proxy));
                    }
                )*
                ::std::option::Option::None
            }
        }
    } else {
        TokenStream::new()
    };

    let properties: Vec<_> = fields.iter().filter(|f| f.property).collect();
    let set_property = if properties.is_empty() {
        TokenStream::new()
    } else {
        let idents = properties.iter().map(|f| &f.ident);
        let names = properties.iter().map(|f| &f.name);
        let matchers = properties.iter().map(|f| &f.name);
        quote! {
            fn has_property(&self, name: &str) -> bool {
                false #( || ::infrastructure_common::NamingConventions::setter_matches(name, #matchers) )*
            }

            fn set_property(
                &self,
                name: &str,
                value: &::infrastructure_common::BeanHandle,
            ) -> ::infrastructure_common::DependencyResult<bool> {
                #(
                    if ::infrastructure_common::NamingConventions::setter_matches(name, #names) {
                        self.#idents.wire(value)?;
                        return ::std::result::Result::Ok(true);
                    }
                )*
                ::std::result::Result::Ok(false)
            }
        }
    };

    let injected: Vec<_> = fields.iter().filter(|f| f.autowired.is_some()).collect();
    let inject_field = if injected.is_empty() {
        TokenStream::new()
    } else {
        let idents = injected.iter().map(|f| &f.ident);
        let names = injected.iter().map(|f| &f.name);
        quote! {
            fn inject_field(
                &self,
                field: &str,
                value: &::infrastructure_common::BeanHandle,
            ) -> ::infrastructure_common::DependencyResult<()> {
                match field {
                    #( #names => self.#idents.wire(value), )*
                    _ => ::std::result::Result::Err(::infrastructure_common::DependencyError::UnknownField {
                        type_name: ::infrastructure_common::Bean::type_name(self).to_string(),
                        field: field.to_string(),
                    }),
                }
            }
        }
    };

    let constructor = match &args.init {
        Some(init) => quote! {
            #init()
                .map(|bean: #struct_name| ::std::sync::Arc::new(bean) as ::std::sync::Arc<dyn ::infrastructure_common::Bean>)
                .map_err(::std::convert::Into::into)
        },
        None => quote! {
            ::std::result::Result::Ok(::std::sync::Arc::new(<#struct_name as ::std::default::Default>::default()))
        },
    };

    let component = match &args.service {
        Some((id, meta_data)) => {
            let with_id = id.as_ref().map(|id| quote!(.with_id(#id)));
            let with_meta_data = meta_data.as_ref().map(|m| quote!(.with_meta_data(#m)));
            quote! {
                .with_component(::infrastructure_common::ComponentMarker::new() #with_id #with_meta_data)
            }
        }
        None => TokenStream::new(),
    };
    let transactional_marker = transactional.then(|| quote!(.transactional()));
    let aliases = &args.aliases;
    let field_descriptors = fields.iter().map(|f| {
        let name = &f.name;
        let property = f.property;
        let inject = match &f.autowired {
            Some(Some(id)) => quote!(::std::option::Option::Some(::infrastructure_common::InjectMarker::by_id(#id))),
            Some(None) => quote!(::std::option::Option::Some(::infrastructure_common::InjectMarker::by_field_name())),
            None => quote!(::std::option::Option::None),
        };
        quote! {
            .with_field(::infrastructure_common::FieldDescriptor {
                name: #name,
                inject: #inject,
                property: #property,
            })
        }
    });
    let registration_fn = registration_fn_name(struct_name);

    Ok(quote! {
        impl ::infrastructure_common::Bean for #struct_name {
            fn type_name(&self) -> &'static str {
                ::std::concat!(::std::module_path!(), "::", ::std::stringify!(#struct_name))
            }

            fn is_transactional(&self) -> bool {
                #transactional
            }

            fn upcast(
                self: ::std::sync::Arc<Self>,
                capability: ::std::any::TypeId,
            ) -> ::std::option::Option<::std::boxed::Box<dyn ::std::any::Any>> {
                if capability == ::std::any::TypeId::of::<Self>() {
                    return ::std::option::Option::Some(::std::boxed::Box::new(self));
                }
                #(
                    if capability == ::std::any::TypeId::of::<dyn #capabilities>() {
                        let upcast: ::std::sync::Arc<dyn #capabilities> = self;
                        return ::std::option::Option::Some(::std::boxed::Box::new(upcast));
                    }
                )*
                ::std::option::Option::None
            }

            #upcast_transactional

            #set_property

            #inject_field
        }

        // 使用 ctor 在程序启动时登记类型
        #[::infrastructure_common::__private::ctor::ctor]
        fn #registration_fn() {
            fn construct() -> ::std::result::Result<
                ::std::sync::Arc<dyn ::infrastructure_common::Bean>,
                ::infrastructure_common::BoxError,
            > {
                #constructor
            }

            ::infrastructure_common::register_type(
                ::infrastructure_common::TypeDescriptor::new(
                    ::std::concat!(::std::module_path!(), "::", ::std::stringify!(#struct_name)),
                    ::std::module_path!(),
                    construct,
                )
                #component
                #transactional_marker
                #( .with_capability(::infrastructure_common::capability_name::<dyn #capabilities>()) )*
                #( .with_alias(#aliases) )*
                #( #field_descriptors )*
            );
        }
    })
}
