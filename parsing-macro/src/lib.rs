use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Expr, Token};

enum FieldRead {
    Normal,
    Magic(Expr),
}

struct ParsedField {
    name: syn::Ident,
    ty: syn::Type,
    read: FieldRead,
}

impl ParsedField {
    fn from_field(field: &syn::Field) -> syn::Result<Self> {
        let Some(name) = field.ident.clone() else {
            return Err(syn::Error::new(field.span(), "only named fields are supported"));
        };
        let mut read = FieldRead::Normal;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("parse")) {
            /*
            #[parse(magic = *b"VPIN")]
             */
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("magic") {
                    meta.input.parse::<Token![=]>()?;
                    read = FieldRead::Magic(meta.input.parse::<Expr>()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown parse directive"))
                }
            })?;
        }
        Ok(Self {
            name,
            ty: field.ty.clone(),
            read,
        })
    }

    fn as_tokens(&self, endianess: &syn::Ident) -> proc_macro2::TokenStream {
        let name = &self.name;
        let ty = &self.ty;
        match &self.read {
            FieldRead::Normal => quote! {
                let #name = input.read_type::<#endianess, #ty>()?;
            },
            FieldRead::Magic(expected) => quote! {
                let #name = input.read_type::<#endianess, #ty>()?;
                if #name != #expected {
                    return Err(::parsing::Error::MagicCheckFailed);
                }
            },
        }
    }
}

fn add_parse_generics(generics: &syn::Generics, lifetime: &syn::Lifetime, endianess: &syn::Ident) -> syn::Generics {
    let mut out = generics.clone();
    out.params.insert(
        0,
        syn::GenericParam::Lifetime(syn::LifetimeParam::new(lifetime.clone())),
    );
    out.params.push(syn::parse_quote!(#endianess: ::parsing::ByteOrder));

    // every borrowed field must outlive the parse input
    let bounds: syn::punctuated::Punctuated<syn::Lifetime, Token![+]> =
        generics.lifetimes().map(|l| l.lifetime.clone()).collect();
    if !bounds.is_empty() {
        out.make_where_clause()
            .predicates
            .push(syn::parse_quote!(#lifetime: #bounds));
    }
    out
}

fn generate_parse_impl(input: &syn::ItemStruct) -> syn::Result<proc_macro2::TokenStream> {
    let syn::Fields::Named(named) = &input.fields else {
        return Err(syn::Error::new(
            input.fields.span(),
            "Parse can only be derived for structs with named fields",
        ));
    };
    let fields = named
        .named
        .iter()
        .map(ParsedField::from_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let parse_lifetime = syn::Lifetime::new("'parse", Span::call_site());
    let endianess = syn::Ident::new("__E", Span::call_site());

    let reads = fields.iter().map(|f| f.as_tokens(&endianess));
    let names = fields.iter().map(|f| &f.name);

    let struct_name = &input.ident;
    let generics = add_parse_generics(&input.generics, &parse_lifetime, &endianess);
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let (_, ty_generics, _) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::parsing::Parse<#parse_lifetime, #endianess> for #struct_name #ty_generics #where_clause {
            fn parse(input: &mut impl ::parsing::ReadBytes<#parse_lifetime>) -> ::parsing::Result<Self> {
                #(
                    #reads
                )*
                Ok(Self {
                    #(
                        #names
                    ),*
                })
            }
        }
    })
}

/// Derives `parsing::Parse` for a fixed-layout record.
///
/// Fields are read in declaration order, each with the byte order chosen
/// by the caller (`read_type_be` / `read_type_le`).
///
/// ```ignore
/// #[derive(Parse)]
/// pub struct Header {
///     #[parse(magic = *b"VPIN")]
///     magic: [u8; 4],
///     pub version: i16,
///     pub count: i16,
/// }
/// ```
/// A `magic` field is read like any other and then compared against the
/// given expression; a mismatch fails the parse with
/// `parsing::Error::MagicCheckFailed`.
#[proc_macro_derive(Parse, attributes(parse))]
pub fn parse_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::ItemStruct);
    match generate_parse_impl(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}
