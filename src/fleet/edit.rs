//! Editable configuration of a crawler
//!
//! `CrawlerEdit` is both the state of the configuration form and the body of
//! the save request: identification fields, page range, year and session
//! credentials, always sent together.

use crate::fleet::model::{CrawlerId, CrawlerInstance};
use crate::fleet::wire::parse_int;
use crate::FleetError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A field of the configuration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    Name,
    Cidade,
    CodigoMunicipio,
    CodigoEntidade,
    NomeEntidade,
    Ano,
    PaginaInicial,
    PaginaFinal,
    CookieSession,
    SessionToken,
    UserSessionToken,
}

impl EditField {
    pub const ALL: [EditField; 11] = [
        EditField::Name,
        EditField::Cidade,
        EditField::CodigoMunicipio,
        EditField::CodigoEntidade,
        EditField::NomeEntidade,
        EditField::Ano,
        EditField::PaginaInicial,
        EditField::PaginaFinal,
        EditField::CookieSession,
        EditField::SessionToken,
        EditField::UserSessionToken,
    ];

    /// Wire name of the field
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Cidade => "cidade",
            Self::CodigoMunicipio => "codigo_municipio",
            Self::CodigoEntidade => "codigo_entidade",
            Self::NomeEntidade => "nome_entidade",
            Self::Ano => "ano",
            Self::PaginaInicial => "pagina_inicial",
            Self::PaginaFinal => "pagina_final",
            Self::CookieSession => "cookie_session",
            Self::SessionToken => "session_token",
            Self::UserSessionToken => "user_session_token",
        }
    }

    /// Returns true for fields entered as integers
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Ano | Self::PaginaInicial | Self::PaginaFinal)
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EditField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.key() == wanted)
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// Configuration form contents / save request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerEdit {
    pub id: CrawlerId,
    pub name: String,
    pub cidade: String,
    pub codigo_municipio: String,
    pub codigo_entidade: String,
    pub nome_entidade: String,
    pub ano: i64,
    pub pagina_inicial: i64,
    pub pagina_final: i64,
    pub cookie_session: String,
    pub session_token: String,
    pub user_session_token: String,
}

impl CrawlerEdit {
    const PAGE_RANGE: &'static str = "pagina_inicial/pagina_final";

    /// Pre-populates the form from a record
    pub fn from_record(crawler: &CrawlerInstance) -> Self {
        Self {
            id: crawler.id.clone(),
            name: crawler.name.clone(),
            cidade: crawler.cidade.clone(),
            codigo_municipio: crawler.codigo_municipio.clone(),
            codigo_entidade: crawler.codigo_entidade.clone(),
            nome_entidade: crawler.nome_entidade.clone(),
            ano: crawler.ano,
            pagina_inicial: crawler.pagina_inicial,
            pagina_final: crawler.pagina_final,
            cookie_session: crawler.cookie_session.clone(),
            session_token: crawler.session_token.clone(),
            user_session_token: crawler.user_session_token.clone(),
        }
    }

    /// Sets a field from operator input
    ///
    /// Integer fields must parse completely (`"042"` is 42, `"12abc"` is
    /// rejected). Text fields, session credentials included, are taken verbatim.
    pub fn set(&mut self, field: EditField, raw: &str) -> Result<(), FleetError> {
        match field {
            EditField::Name => self.name = raw.to_string(),
            EditField::Cidade => self.cidade = raw.to_string(),
            EditField::CodigoMunicipio => self.codigo_municipio = raw.to_string(),
            EditField::CodigoEntidade => self.codigo_entidade = raw.to_string(),
            EditField::NomeEntidade => self.nome_entidade = raw.to_string(),
            EditField::Ano => self.ano = parse_int_field(field, raw)?,
            EditField::PaginaInicial => self.pagina_inicial = parse_int_field(field, raw)?,
            EditField::PaginaFinal => self.pagina_final = parse_int_field(field, raw)?,
            EditField::CookieSession => self.cookie_session = raw.to_string(),
            EditField::SessionToken => self.session_token = raw.to_string(),
            EditField::UserSessionToken => self.user_session_token = raw.to_string(),
        }
        Ok(())
    }

    /// Current value of a field as text
    pub fn get(&self, field: EditField) -> String {
        match field {
            EditField::Name => self.name.clone(),
            EditField::Cidade => self.cidade.clone(),
            EditField::CodigoMunicipio => self.codigo_municipio.clone(),
            EditField::CodigoEntidade => self.codigo_entidade.clone(),
            EditField::NomeEntidade => self.nome_entidade.clone(),
            EditField::Ano => self.ano.to_string(),
            EditField::PaginaInicial => self.pagina_inicial.to_string(),
            EditField::PaginaFinal => self.pagina_final.to_string(),
            EditField::CookieSession => self.cookie_session.clone(),
            EditField::SessionToken => self.session_token.clone(),
            EditField::UserSessionToken => self.user_session_token.clone(),
        }
    }

    /// Checks the form before it is submitted
    ///
    /// Records fetched from the backend are trusted as they are; only a range
    /// typed in by the operator is rejected when it starts after it ends.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.pagina_inicial > self.pagina_final {
            return Err(FleetError::InvalidField {
                field: Self::PAGE_RANGE,
                value: format!("{}..{}", self.pagina_inicial, self.pagina_final),
                reason: "pagina_inicial must not be greater than pagina_final".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_int_field(field: EditField, raw: &str) -> Result<i64, FleetError> {
    parse_int(raw).ok_or_else(|| FleetError::InvalidField {
        field: field.key(),
        value: raw.to_string(),
        reason: "expected an integer".to_string(),
    })
}
