use crate::error::LoadError;
use crate::record::ArgRecord;
use crate::registry::ArgLoader;
use crate::value::RawArgs;

impl ArgLoader {
    /// Load `args` into the annotated fields of `record`.
    ///
    /// Fields are processed in declaration order:
    /// - absent + required → `MissingRequired`;
    /// - absent + optional → field left untouched;
    /// - present → converted by the converter registered for the field type
    ///   and written into the field.
    ///
    /// The first failure aborts the call. Fields written before it keep their
    /// new values, so discard `record` on error (or use [`ArgLoader::parse_args`]).
    pub fn load_args<R: ArgRecord>(&self, args: &RawArgs, record: &mut R) -> Result<(), LoadError> {
        for field in R::arg_fields() {
            let Some(raw) = args.get(field.arg()) else {
                if field.is_required()? {
                    return Err(LoadError::MissingRequired { arg: field.arg() });
                }
                tracing::trace!(arg = field.arg(), "optional argument absent");
                continue;
            };

            if raw.is_null() {
                // Present-but-null still counts as present and reaches the converter.
                tracing::warn!(
                    arg = field.arg(),
                    field = field.field(),
                    "argument is present but null"
                );
            }

            let converter = self
                .converter(field.type_id())
                .ok_or(LoadError::NoConverter {
                    type_name: field.type_name(),
                })?;

            let value = converter.convert(raw).map_err(|source| LoadError::Convert {
                field: field.field(),
                source,
            })?;
            field
                .assign(record, value)
                .map_err(|source| LoadError::Convert {
                    field: field.field(),
                    source,
                })?;
            tracing::trace!(arg = field.arg(), field = field.field(), "loaded argument");
        }
        Ok(())
    }

    /// Build a fresh `R` from its default and load `args` into it.
    ///
    /// On error nothing is returned, so no partially loaded record escapes.
    pub fn parse_args<R: ArgRecord + Default>(&self, args: &RawArgs) -> Result<R, LoadError> {
        let mut record = R::default();
        self.load_args(args, &mut record)?;
        Ok(record)
    }
}
