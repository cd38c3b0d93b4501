use fxhash::FxHashSet;
use proc_macro2::{TokenStream, TokenTree};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Ident, LitStr, Meta,
    PathArguments, Type, parse_quote,
};

/// Serde keys that already take over (de)serialization of a field.
const SERDE_CODEC_KEYS: &[&str] = &["with", "serialize_with", "deserialize_with"];

#[derive(Default)]
struct TimeArgs {
    format: Option<LitStr>,
    zone: Option<LitStr>,
    skip: bool,
    annotated: bool,
}

/// Expands the `#[time_fields]` macro.
pub fn expand_time_fields(args: TokenStream, mut input: DeriveInput) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new_spanned(args, "`time_fields` takes no arguments").to_compile_error();
    }

    let name = input.ident.unraw();
    let fields = match named_fields_mut(&mut input) {
        Ok(fields) => fields,
        Err(err) => return err,
    };

    let mut helpers = Vec::new();
    for field in fields {
        match rewrite_field(&name, field) {
            Ok(Some(helper)) => helpers.push(helper),
            Ok(None) => {},
            Err(err) => return err,
        }
    }

    quote! {
        #input
        #(#helpers)*
    }
}

fn named_fields_mut(input: &mut DeriveInput) -> Result<impl Iterator<Item = &mut Field>, TokenStream> {
    let span = input.ident.clone();
    match &mut input.data {
        Data::Struct(data) => match &mut data.fields {
            Fields::Named(fields) => Ok(fields.named.iter_mut()),
            Fields::Unnamed(_) | Fields::Unit => Err(syn::Error::new_spanned(
                span,
                "`time_fields` only supports structs with named fields",
            )
            .to_compile_error()),
        },
        _ => Err(syn::Error::new_spanned(span, "`time_fields` only supports structs")
            .to_compile_error()),
    }
}

/// Strips `#[time(..)]` from `field` and wires it to a generated helper module.
/// Returns the module, or `None` when the field is left to serde.
fn rewrite_field(struct_name: &Ident, field: &mut Field) -> Result<Option<TokenStream>, TokenStream> {
    let args = take_time_args(&mut field.attrs)?;
    if args.skip {
        return Ok(None);
    }

    let is_option = option_inner(&field.ty).is_some();
    let is_timestamp = is_datetime(&field.ty) || option_inner(&field.ty).is_some_and(is_datetime);
    if !args.annotated && !is_timestamp {
        return Ok(None);
    }

    let serde_keys = serde_keys(&field.attrs);
    if let Some(key) = SERDE_CODEC_KEYS.iter().find(|key| serde_keys.contains(**key)) {
        if !args.annotated {
            return Ok(None);
        }
        return Err(syn::Error::new_spanned(
            &field.ident,
            format!("`#[time(..)]` cannot be combined with `#[serde({key} = ..)]`"),
        )
        .to_compile_error());
    }

    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(&field.ty, "`time_fields` only supports named fields")
            .to_compile_error());
    };
    let helper_mod = format_ident!("__jsontime_{}_{}", struct_name, ident.unraw());
    let helper_path = LitStr::new(&helper_mod.to_string(), ident.span());

    field.attrs.push(parse_quote!(#[serde(with = #helper_path)]));
    if is_option && !serde_keys.contains("default") {
        field.attrs.push(parse_quote!(#[serde(default)]));
    }

    Ok(Some(helper_mod_tokens(&helper_mod, &args)))
}

fn take_time_args(attrs: &mut Vec<Attribute>) -> Result<TimeArgs, TokenStream> {
    let mut args = TimeArgs::default();
    let mut error: Option<syn::Error> = None;

    attrs.retain(|attr| {
        if !attr.path().is_ident("time") {
            return true;
        }
        args.annotated = true;
        if let Err(err) = parse_time_attr(attr, &mut args) {
            match &mut error {
                Some(existing) => existing.combine(err),
                None => error = Some(err),
            }
        }
        false
    });

    if let Some(err) = error {
        return Err(err.to_compile_error());
    }
    if args.skip && (args.format.is_some() || args.zone.is_some()) {
        let span = args.format.as_ref().or(args.zone.as_ref());
        return Err(syn::Error::new_spanned(span, "`skip` cannot be combined with `format` or `zone`")
            .to_compile_error());
    }
    Ok(args)
}

fn parse_time_attr(attr: &Attribute, args: &mut TimeArgs) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("format") {
            let value = non_empty(meta.value()?.parse()?)?;
            return set_once(&mut args.format, value, &meta.path);
        }
        if meta.path.is_ident("zone") {
            let value = non_empty(meta.value()?.parse()?)?;
            return set_once(&mut args.zone, value, &meta.path);
        }
        if meta.path.is_ident("skip") {
            if args.skip {
                return Err(meta.error("Duplicate `skip`"));
            }
            args.skip = true;
            return Ok(());
        }
        Err(meta.error("Unsupported key; expected `format`, `zone` or `skip`"))
    })
}

fn non_empty(lit: LitStr) -> syn::Result<LitStr> {
    if lit.value().trim().is_empty() {
        return Err(syn::Error::new_spanned(lit, "Value must not be empty"));
    }
    Ok(lit)
}

fn set_once(slot: &mut Option<LitStr>, value: LitStr, path: &syn::Path) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(path, "Duplicate key"));
    }
    *slot = Some(value);
    Ok(())
}

/// Top-level keys of every `#[serde(..)]` attribute, e.g. `rename`, `with`.
fn serde_keys(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut keys = FxHashSet::default();

    for attr in attrs {
        let Meta::List(list) = &attr.meta else { continue };
        if !list.path.is_ident("serde") {
            continue;
        }

        let mut expect_key = true;
        for token in list.tokens.clone() {
            match token {
                TokenTree::Ident(ident) if expect_key => {
                    keys.insert(ident.to_string());
                    expect_key = false;
                },
                TokenTree::Punct(punct) if punct.as_char() == ',' => expect_key = true,
                _ => expect_key = false,
            }
        }
    }

    keys
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        Type::Group(group) => last_segment(&group.elem),
        Type::Paren(paren) => last_segment(&paren.elem),
        _ => None,
    }
}

fn is_datetime(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|segment| segment.ident == "DateTime")
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

fn lit_option(value: Option<&LitStr>) -> TokenStream {
    match value {
        Some(lit) => quote! { ::core::option::Option::Some(#lit) },
        None => quote! { ::core::option::Option::None },
    }
}

fn helper_mod_tokens(helper_mod: &Ident, args: &TimeArgs) -> TokenStream {
    let format = lit_option(args.format.as_ref());
    let zone = lit_option(args.zone.as_ref());

    quote! {
        #[doc(hidden)]
        #[allow(non_snake_case)]
        mod #helper_mod {
            const SPEC: ::jsontime::FieldSpec<'static> = ::jsontime::FieldSpec::new(#format, #zone);

            pub(super) fn serialize<__T, __S>(
                value: &__T,
                serializer: __S,
            ) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __T: ::jsontime::TimeField,
                __S: ::jsontime::__private::serde::Serializer,
            {
                ::jsontime::TimeField::serialize_field(value, &SPEC, serializer)
            }

            pub(super) fn deserialize<'de, __T, __D>(
                deserializer: __D,
            ) -> ::core::result::Result<__T, __D::Error>
            where
                __T: ::jsontime::TimeField,
                __D: ::jsontime::__private::serde::Deserializer<'de>,
            {
                <__T as ::jsontime::TimeField>::deserialize_field(&SPEC, deserializer)
            }
        }
    }
}
