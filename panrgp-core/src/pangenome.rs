//! In-memory pangenome data model.
//!
//! The model is arena-oriented: gene families live once on the
//! [`Pangenome`] and are referenced by [`FamilyId`] indices from genes,
//! regions and border signatures. Organisms own contigs, contigs own their
//! genes in positional order. Family occurrence bookkeeping (which organisms
//! carry a family, and how many copies each carries) is maintained as genes
//! are added, so the multigenic classifier never has to re-scan the genome
//! set.

use std::collections::HashMap;

use crate::config::RgpParameters;
use crate::region::Region;
use crate::types::{FamilyId, FeatureKind, PanRgpError, Partition, Strand};

/// A cluster of homologous genes with an upstream-computed partition.
#[derive(Debug, Clone)]
pub struct GeneFamily {
    /// Family identifier (unique within the pangenome)
    pub name: String,
    /// Partition label, fixed once computed upstream; this core only reads it
    pub partition: Partition,
    /// Gene count per organism index
    occurrences: HashMap<usize, u32>,
}

impl GeneFamily {
    fn new(name: String, partition: Partition) -> Self {
        Self {
            name,
            partition,
            occurrences: HashMap::new(),
        }
    }

    /// Number of organisms carrying at least one gene of this family.
    #[must_use]
    pub fn organism_count(&self) -> usize {
        self.occurrences.len()
    }

    /// Number of organisms carrying this family more than once.
    #[must_use]
    pub fn duplicated_count(&self) -> usize {
        self.occurrences.values().filter(|&&count| count > 1).count()
    }

    /// Gene count of this family within one organism.
    #[must_use]
    pub fn gene_count_in(&self, organism: usize) -> u32 {
        self.occurrences.get(&organism).copied().unwrap_or(0)
    }
}

/// A single annotated gene, owned by its contig.
#[derive(Debug, Clone)]
pub struct Gene {
    /// Unique gene identifier
    pub id: String,
    /// Family this gene belongs to
    pub family: FamilyId,
    /// Positional index along the contig (0-based)
    pub position: usize,
    /// Start coordinate (bp)
    pub start: u64,
    /// Stop coordinate (bp)
    pub stop: u64,
    /// Strand orientation
    pub strand: Strand,
    /// Biological feature type
    pub kind: FeatureKind,
    /// Display name
    pub name: String,
    /// Annotated product
    pub product: String,
}

/// Gene attributes supplied when populating a contig.
///
/// The positional index is assigned by [`Pangenome::add_gene`] from the
/// insertion order, which is the fixed gene order along the sequence.
#[derive(Debug, Clone)]
pub struct GeneRecord {
    pub id: String,
    pub family: FamilyId,
    pub start: u64,
    pub stop: u64,
    pub strand: Strand,
    pub kind: FeatureKind,
    pub name: String,
    pub product: String,
}

impl Default for GeneRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            family: 0,
            start: 0,
            stop: 0,
            strand: Strand::Unknown,
            kind: FeatureKind::default(),
            name: String::new(),
            product: String::new(),
        }
    }
}

/// An ordered sequence of genes belonging to one organism.
#[derive(Debug, Clone)]
pub struct Contig {
    /// Contig name (unique within the pangenome)
    pub name: String,
    /// Whether the sequence logically wraps (successor of the last gene is
    /// the first)
    pub is_circular: bool,
    /// Genes in positional order
    pub genes: Vec<Gene>,
}

/// One genome of the pangenome, owning its contigs.
#[derive(Debug, Clone)]
pub struct Organism {
    pub name: String,
    pub contigs: Vec<Contig>,
}

/// Location of a contig inside the pangenome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContigRef {
    /// Organism index
    pub organism: usize,
    /// Contig index within the organism
    pub contig: usize,
}

/// Prior computation status flags of the pangenome.
///
/// All three upstream flags must be set before RGP prediction runs. They are
/// raised as the corresponding content is added: genes raise
/// `genomes_annotated`, families raise `genes_clustered`, and a family with
/// a defined partition label raises `partitions_computed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PangenomeStatus {
    /// Genomes are annotated (organisms, contigs and genes are present)
    pub genomes_annotated: bool,
    /// Genes are clustered into families
    pub genes_clustered: bool,
    /// Families carry partition labels
    pub partitions_computed: bool,
    /// RGP prediction completed for this pangenome
    pub rgp_predicted: bool,
}

/// The collected set of gene families and genomes under joint analysis.
#[derive(Debug, Clone, Default)]
pub struct Pangenome {
    families: Vec<GeneFamily>,
    family_index: HashMap<String, FamilyId>,
    /// Genomes of the pangenome
    pub organisms: Vec<Organism>,
    /// Prior computation status
    pub status: PangenomeStatus,
    /// Predicted regions, attached once prediction completes
    pub regions: Vec<Region>,
    /// Parameters of the completed prediction run
    pub parameters: Option<RgpParameters>,
}

impl Pangenome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gene family, returning its id.
    ///
    /// Registering the same name twice with the same partition returns the
    /// existing id, and a family first registered as
    /// [`Partition::Undefined`] is upgraded when a defined label arrives
    /// later. The `partitions_computed` status flag is only raised by
    /// defined labels.
    ///
    /// # Errors
    ///
    /// Returns [`PanRgpError::InvalidInput`] if the name was already
    /// registered under a different defined partition.
    pub fn add_family(
        &mut self,
        name: &str,
        partition: Partition,
    ) -> Result<FamilyId, PanRgpError> {
        if let Some(&id) = self.family_index.get(name) {
            let existing = self.families[id].partition;
            if partition != Partition::Undefined && existing != partition {
                if existing != Partition::Undefined {
                    return Err(PanRgpError::InvalidInput(format!(
                        "family {} registered with conflicting partitions ({} and {})",
                        name, existing, partition
                    )));
                }
                self.families[id].partition = partition;
                self.status.partitions_computed = true;
            }
            return Ok(id);
        }
        let id = self.families.len();
        self.families
            .push(GeneFamily::new(name.to_string(), partition));
        self.family_index.insert(name.to_string(), id);
        self.status.genes_clustered = true;
        if partition != Partition::Undefined {
            self.status.partitions_computed = true;
        }
        Ok(id)
    }

    /// Adds an organism and returns its index.
    pub fn add_organism(&mut self, name: &str) -> usize {
        self.organisms.push(Organism {
            name: name.to_string(),
            contigs: Vec::new(),
        });
        self.organisms.len() - 1
    }

    /// Adds a contig to an organism and returns its index within the organism.
    pub fn add_contig(&mut self, organism: usize, name: &str, is_circular: bool) -> usize {
        let contigs = &mut self.organisms[organism].contigs;
        contigs.push(Contig {
            name: name.to_string(),
            is_circular,
            genes: Vec::new(),
        });
        contigs.len() - 1
    }

    /// Appends a gene to a contig, assigning the next positional index and
    /// updating the family occurrence bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns [`PanRgpError::InvalidInput`] if the gene references an
    /// unknown family.
    pub fn add_gene(
        &mut self,
        location: ContigRef,
        record: GeneRecord,
    ) -> Result<(), PanRgpError> {
        if record.family >= self.families.len() {
            return Err(PanRgpError::InvalidInput(format!(
                "gene {} references unknown family id {}",
                record.id, record.family
            )));
        }
        *self.families[record.family]
            .occurrences
            .entry(location.organism)
            .or_insert(0) += 1;

        let contig = &mut self.organisms[location.organism].contigs[location.contig];
        let position = contig.genes.len();
        contig.genes.push(Gene {
            id: record.id,
            family: record.family,
            position,
            start: record.start,
            stop: record.stop,
            strand: record.strand,
            kind: record.kind,
            name: record.name,
            product: record.product,
        });
        self.status.genomes_annotated = true;
        Ok(())
    }

    /// All registered families, indexable by [`FamilyId`].
    #[must_use]
    pub fn families(&self) -> &[GeneFamily] {
        &self.families
    }

    /// One family by id. Panics on an id not produced by [`add_family`],
    /// which cannot be observed through the public API.
    ///
    /// [`add_family`]: Self::add_family
    #[must_use]
    pub fn family(&self, id: FamilyId) -> &GeneFamily {
        &self.families[id]
    }

    /// Looks a family up by name.
    #[must_use]
    pub fn family_id(&self, name: &str) -> Option<FamilyId> {
        self.family_index.get(name).copied()
    }

    /// Resolves a contig reference.
    #[must_use]
    pub fn contig(&self, location: ContigRef) -> &Contig {
        &self.organisms[location.organism].contigs[location.contig]
    }

    /// Total gene count across the pangenome.
    #[must_use]
    pub fn gene_count(&self) -> usize {
        self.organisms
            .iter()
            .flat_map(|organism| &organism.contigs)
            .map(|contig| contig.genes.len())
            .sum()
    }

    /// Attaches a completed prediction: regions become the pangenome region
    /// collection, parameters are recorded as run metadata and the status
    /// flag is raised.
    pub fn attach_regions(&mut self, regions: Vec<Region>, parameters: RgpParameters) {
        self.regions = regions;
        self.parameters = Some(parameters);
        self.status.rgp_predicted = true;
    }

    /// Fails fast if an upstream prerequisite is missing.
    ///
    /// # Errors
    ///
    /// Returns [`PanRgpError::MissingPrerequisite`] naming the first missing
    /// computation.
    pub fn check_prerequisites(&self) -> Result<(), PanRgpError> {
        if !self.status.genomes_annotated {
            return Err(PanRgpError::MissingPrerequisite(
                "genome annotations (organisms, contigs and genes)".to_string(),
            ));
        }
        if !self.status.genes_clustered {
            return Err(PanRgpError::MissingPrerequisite(
                "gene families (clustering)".to_string(),
            ));
        }
        if !self.status.partitions_computed {
            return Err(PanRgpError::MissingPrerequisite(
                "family partitions".to_string(),
            ));
        }
        Ok(())
    }
}
