//! Shared query fragments.

/// Selects every column of a player.
pub(super) const SELECT: &str = r"
	SELECT
	  id,
	  first_name,
	  last_name,
	  position,
	  height,
	  weight,
	  jersey_number,
	  college,
	  country
	FROM
	  Players
";
