// crates/network/src/plex.rs
//! `MediaCatalog` backed by a Plex Media Server

use crate::client::{ClientConfig, PlexHttpClient};
use crate::error::{NetworkError, NetworkResult};
use crate::models::{
    CollectionEntry, Envelope, MetadataList, MovieEntry, SectionEntry, SectionList,
    ServerIdentity,
};
use plex_cleanup_core::{CatalogResult, Collection, MediaCatalog, Movie};

/// Plex library item type for movies
const TYPE_MOVIE: &str = "1";
/// Plex library item type for collections
const TYPE_COLLECTION: &str = "18";

/// A connected Plex server
pub struct PlexCatalog {
    client: PlexHttpClient,
    identity: ServerIdentity,
}

impl PlexCatalog {
    /// Connects to the server, verifying both reachability and the token
    pub fn connect(url: &str, token: &str, config: &ClientConfig) -> NetworkResult<Self> {
        log::info!("Attempting to connect to plex instance at: {}", url);

        let client = PlexHttpClient::new(url, token, config)?;
        let identity = client
            .get_json::<Envelope<ServerIdentity>>("/", &[])?
            .media_container;

        log::info!(
            "Successfully connected to plex instance at: {} ({} {})",
            url,
            identity.friendly_name.as_deref().unwrap_or("unnamed server"),
            identity.version.as_deref().unwrap_or("unknown version"),
        );

        Ok(Self { client, identity })
    }

    /// Server name reported at connect time
    pub fn server_name(&self) -> &str {
        self.identity.friendly_name.as_deref().unwrap_or("Plex")
    }

    /// Server version reported at connect time
    pub fn server_version(&self) -> Option<&str> {
        self.identity.version.as_deref()
    }

    /// Lists every library section on the server
    pub fn sections(&self) -> NetworkResult<Vec<SectionEntry>> {
        Ok(self
            .client
            .get_json::<Envelope<SectionList>>("/library/sections", &[])?
            .media_container
            .directories)
    }

    /// Resolves a library name to its section
    pub fn section(&self, library: &str) -> NetworkResult<SectionEntry> {
        find_section(self.sections()?, library)
            .ok_or_else(|| NetworkError::LibraryNotFound(library.to_string()))
    }

    fn list<T>(&self, section_key: &str, item_type: &str) -> NetworkResult<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let path = format!("/library/sections/{}/all", section_key);
        Ok(self
            .client
            .get_json::<Envelope<MetadataList<T>>>(&path, &[("type", item_type)])?
            .media_container
            .metadata)
    }
}

/// Finds a section by title, preferring an exact match over a case-insensitive one
fn find_section(sections: Vec<SectionEntry>, library: &str) -> Option<SectionEntry> {
    let exact = sections.iter().position(|s| s.title == library);
    let index = exact.or_else(|| {
        sections
            .iter()
            .position(|s| s.title.to_lowercase() == library.to_lowercase())
    })?;
    sections.into_iter().nth(index)
}

impl MediaCatalog for PlexCatalog {
    fn collections(&self, library: &str) -> CatalogResult<Vec<Collection>> {
        let section = self.section(library)?;
        let entries: Vec<CollectionEntry> = self.list(&section.key, TYPE_COLLECTION)?;

        Ok(entries
            .into_iter()
            .map(|entry| entry.into_collection(library))
            .collect())
    }

    fn delete_collection(&self, collection: &Collection) -> CatalogResult<()> {
        let path = format!("/library/metadata/{}", collection.rating_key);
        self.client.delete(&path)?;
        Ok(())
    }

    fn movies(&self, library: &str) -> CatalogResult<Vec<Movie>> {
        let section = self.section(library)?;
        let entries: Vec<MovieEntry> = self.list(&section.key, TYPE_MOVIE)?;

        Ok(entries
            .into_iter()
            .map(|entry| entry.into_movie(&section.key))
            .collect())
    }

    fn update_movie_title(
        &self,
        movie: &Movie,
        title: &str,
        sort_title: &str,
    ) -> CatalogResult<()> {
        let path = format!("/library/sections/{}/all", movie.section_key);
        self.client.put(
            &path,
            &[
                ("type", TYPE_MOVIE),
                ("id", movie.rating_key.as_str()),
                ("title.value", title),
                ("title.locked", "1"),
                ("titleSort.value", sort_title),
                ("titleSort.locked", "1"),
            ],
        )?;
        Ok(())
    }
}
